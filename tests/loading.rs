use std::{fs, io::Cursor, path::Path};

use tempfile::TempDir;
use ultraviolet::Vec4;
use weavy_mesh::{Error, IlluminationModel};

const TRIANGLE: &str = "mtllib shading.mtl
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
o tri
usemtl glossy
f 1//1 2//1 3//1
";

const SHADING: &str = "newmtl glossy
Kd 0.2 0.4 0.6
Ns 96
illum 2
map_Kd -bm 2 textures/glossy.png
";

fn write(directory: &Path, name: &str, text: &str) {
    fs::write(directory.join(name), text).unwrap();
}

#[test]
fn libraries_resolve_next_to_the_obj_file() {
    let directory = TempDir::new().unwrap();
    write(directory.path(), "tri.obj", TRIANGLE);
    write(directory.path(), "shading.mtl", SHADING);

    let obj_path = directory.path().join("tri.obj");
    let collection = weavy_mesh::load_file(&obj_path, None).unwrap();
    assert_eq!(collection.name(), "tri");
    assert_eq!(collection.source_path(), Some(obj_path.as_path()));

    let glossy = collection.material("glossy").unwrap();
    assert_eq!(glossy.diffuse_color, Some(Vec4::new(0.2, 0.4, 0.6, 1.0)));
    assert_eq!(glossy.specular_exponent, Some(96.0));
    assert_eq!(glossy.illumination, Some(IlluminationModel::HighlightOn));

    let texture = glossy.diffuse_map.as_ref().unwrap();
    assert_eq!(texture.filename, "textures/glossy.png");
    assert_eq!(texture.bump_multiplier, Some(2.0));

    let mesh = collection.mesh("tri").unwrap();
    let submesh = mesh.submesh("glossy").unwrap();
    assert_eq!(submesh.triangles().len(), 1);
    assert!(!submesh.has_missing_normals());
}

#[test]
fn missing_obj_file_is_an_error() {
    let directory = TempDir::new().unwrap();
    let obj_path = directory.path().join("absent.obj");

    match weavy_mesh::load_file(&obj_path, None) {
        Err(Error::PathNotFound(path)) => assert_eq!(path, obj_path),
        other => panic!("unexpected result: {:?}", other.map(|c| c.meshes().len())),
    }
}

#[test]
fn missing_explicit_library_is_skipped() {
    let directory = TempDir::new().unwrap();
    write(directory.path(), "tri.obj", TRIANGLE);

    let collection = weavy_mesh::load_file(
        directory.path().join("tri.obj"),
        Some(&directory.path().join("absent.mtl")),
    )
    .unwrap();

    assert_eq!(collection.materials().len(), 1);
    let submesh = &collection.mesh("tri").unwrap().submeshes()[0];
    assert_eq!(submesh.material_name(), "");
}

#[test]
fn explicit_library_is_overridden_by_mtllib() {
    let directory = TempDir::new().unwrap();
    write(directory.path(), "tri.obj", TRIANGLE);
    write(directory.path(), "shading.mtl", SHADING);
    write(
        directory.path(),
        "extra.mtl",
        "newmtl glossy\nillum 0\nnewmtl matte\nKd 1 1 1\n",
    );

    let collection = weavy_mesh::load_file(
        directory.path().join("tri.obj"),
        Some(&directory.path().join("extra.mtl")),
    )
    .unwrap();

    let names: Vec<_> = collection
        .materials()
        .iter()
        .map(|m| m.name.as_str())
        .collect();
    assert_eq!(names, vec!["", "glossy", "matte"]);
    assert_eq!(
        collection.material("glossy").unwrap().illumination,
        Some(IlluminationModel::HighlightOn)
    );
}

#[test]
fn streams_load_without_a_file_system() {
    let collection = weavy_mesh::load_with_materials(
        Cursor::new("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nusemtl glossy\nf 1 2 3 4\n"),
        Cursor::new(SHADING),
    )
    .unwrap();

    assert_eq!(collection.name(), "");
    assert!(collection.source_path().is_none());

    let (meshes, materials) = collection.split();
    assert_eq!(meshes.len(), 1);
    assert_eq!(meshes[0].triangle_count(), 2);
    assert!(meshes[0].submeshes()[0].has_missing_normals());
    assert_eq!(materials.len(), 2);
}
