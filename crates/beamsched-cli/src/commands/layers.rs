use beamsched_core::error::BeamError;
use beamsched_core::layers::builtin;
use beamsched_core::layers::schema::LayerMap;
use std::path::Path;

pub fn show() -> Result<(), BeamError> {
    for name in builtin::PRESETS {
        let map = builtin::load_preset(name)?;
        print_map(&map);
        println!();
    }
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), BeamError> {
    let map = beamsched_core::layers::load_layer_map(file)?;
    println!("Layer map '{}' is valid.\n", map.name);
    print_map(&map);

    let defaults = LayerMap::default();
    let renamed: Vec<String> = map
        .roles()
        .iter()
        .zip(defaults.roles())
        .filter(|((_, name), (_, default))| !name.trim().eq_ignore_ascii_case(default))
        .map(|((role, name), _)| format!("{role} -> '{name}'"))
        .collect();
    if !renamed.is_empty() {
        println!("\nDiffers from the built-in map:");
        for r in &renamed {
            println!("  - {r}");
        }
    }

    Ok(())
}

fn print_map(map: &LayerMap) {
    println!("{}", map.name);
    if let Some(ref desc) = map.description {
        println!("  {desc}");
    }
    println!();
    for (role, layer) in map.roles() {
        println!("  {:<10} {}", role.to_string(), layer);
    }
    println!("  {:<10} {}", "tolerance", map.tolerance);
}
