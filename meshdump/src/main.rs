mod cli;

use crate::cli::Arguments;
use std::env;

use anyhow::{Context, Result};
use clap::Parser;
use itertools::Itertools;
use log::info;
use weavy_mesh::{Material, MeshCollection, Texture};

fn main() -> Result<()> {
    let arguments = Arguments::parse();
    initialize_logger(arguments.verbose);

    info!("Loading {}", arguments.obj.display());
    let collection = weavy_mesh::load_file(&arguments.obj, arguments.mtl.as_deref())
        .with_context(|| format!("Failed to load {}", arguments.obj.display()))?;

    print_summary(&collection);
    Ok(())
}

fn initialize_logger(verbose: bool) {
    let mut builder = pretty_env_logger::formatted_builder();
    match env::var("RUST_LOG") {
        Ok(filters) => builder.parse_filters(&filters),
        Err(_) if verbose => builder.parse_filters("debug"),
        Err(_) => builder.parse_filters("info"),
    };
    builder.init();
}

fn print_summary(collection: &MeshCollection) {
    let name = if collection.name().is_empty() {
        "(unnamed)"
    } else {
        collection.name()
    };
    println!("{}", name);

    for mesh in collection.meshes() {
        println!(
            "mesh \"{}\": {} vertices, {} triangles",
            mesh.name(),
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        for submesh in mesh.submeshes() {
            let note = if submesh.has_missing_normals() {
                " (missing normals)"
            } else {
                ""
            };
            println!(
                "  usemtl \"{}\": {} triangles{}",
                submesh.material_name(),
                submesh.triangles().len(),
                note
            );
        }
    }

    for material in collection.materials() {
        let illumination = material
            .illumination
            .map_or_else(|| "-".to_owned(), |m| m.index().to_string());
        println!(
            "material \"{}\" illum={} {}",
            material.name,
            illumination,
            describe_textures(material)
        );
    }
}

/// Lists bound textures as `slot=filename` pairs.
fn describe_textures(material: &Material) -> String {
    let slots: [(&str, &Option<Texture>); 8] = [
        ("map_Ka", &material.ambient_map),
        ("map_Kd", &material.diffuse_map),
        ("map_Ks", &material.specular_map),
        ("map_Ns", &material.specular_exponent_map),
        ("map_d", &material.dissolve_map),
        ("decal", &material.decal),
        ("disp", &material.displacement),
        ("bump", &material.bump_map),
    ];

    slots
        .iter()
        .filter_map(|&(slot, texture)| {
            texture
                .as_ref()
                .map(|t| format!("{}={}", slot, t.filename))
        })
        .join(" ")
}
