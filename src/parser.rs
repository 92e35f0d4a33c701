use crate::{
    mtl::{parse_mtl, Material},
    obj::{AttributePools, FaceBuffer, Mesh},
    tokenizer::Tokenizer,
    MeshCollection, Result,
};

use std::{
    collections::HashMap,
    fmt::Display,
    fs::File,
    io::{prelude::*, BufReader, Result as IoResult},
    path::{Path, PathBuf},
    sync::Arc,
};

use log::{debug, info, warn};

/// Represents the keyword of a line in OBJ file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ObjDirective {
    /// `mtllib`
    MaterialLibrary,

    /// `usemtl`
    UseMaterial,

    /// `o`, `g`
    Object,

    /// `v`
    Vertex,

    /// `vt`
    VertexUv,

    /// `vn`
    VertexNormal,

    /// `f`
    Face,

    /// `s`
    SmoothingGroup,
}

impl ObjDirective {
    /// Expects a lower-cased keyword.
    fn from_keyword(keyword: &str) -> Option<ObjDirective> {
        let directive = match keyword {
            "mtllib" => ObjDirective::MaterialLibrary,
            "usemtl" => ObjDirective::UseMaterial,
            "o" | "g" => ObjDirective::Object,
            "v" => ObjDirective::Vertex,
            "vt" => ObjDirective::VertexUv,
            "vn" => ObjDirective::VertexNormal,
            "f" => ObjDirective::Face,
            "s" => ObjDirective::SmoothingGroup,
            _ => return None,
        };
        Some(directive)
    }
}

/// Represents the parser of OBJ/MTL.
pub struct Parser<R> {
    include_function: Box<dyn FnMut(&Path) -> IoResult<R>>,
}

impl<R: Read> Parser<R> {
    /// Creates an instance of `Parser`.
    /// # Parameters
    /// * `include_function`
    ///     - An resolver closure/function for MTL file
    ///     - When detects `mtllib` command, it tries to resolve the path of
    ///       MTL file. The parser calls this resolver with detected path,
    ///       so you can return any `Read` instance or error.
    ///       An error only skips that library.
    pub fn new(include_function: impl FnMut(&Path) -> IoResult<R> + 'static) -> Parser<R> {
        Parser {
            include_function: Box::new(include_function),
        }
    }

    /// Parses the OBJ file.
    pub fn parse(&mut self, reader: impl Read) -> Result<MeshCollection> {
        self.parse_impl(reader, vec![])
    }

    /// Parses the OBJ file with an additional MTL stream, which is merged
    /// before any `mtllib` of the OBJ file.
    pub fn parse_with_materials(
        &mut self,
        reader: impl Read,
        material_reader: impl Read,
    ) -> Result<MeshCollection> {
        let materials = read_library(material_reader, "material stream");
        self.parse_impl(reader, materials)
    }

    fn parse_impl(
        &mut self,
        reader: impl Read,
        materials: Vec<Material>,
    ) -> Result<MeshCollection> {
        let mut tokenizer = Tokenizer::new(BufReader::new(reader));
        let mut obj_buffer = ObjBuffer::new();
        obj_buffer.merge_materials(materials);

        while tokenizer.advance()? {
            if !tokenizer.has_directive() {
                continue;
            }
            self.process_obj_line(&mut obj_buffer, &mut tokenizer);
        }

        let collection = obj_buffer.into_collection();
        info!(
            "Parsed {} meshes, {} materials",
            collection.meshes.len(),
            collection.materials.len()
        );
        Ok(collection)
    }

    fn process_obj_line<B>(&mut self, obj_buffer: &mut ObjBuffer, tokenizer: &mut Tokenizer<B>) {
        let keyword = tokenizer.read_str().to_ascii_lowercase();
        let directive = match ObjDirective::from_keyword(&keyword) {
            Some(d) => d,
            None => {
                debug!(
                    "Unsupported OBJ keyword: {} (line {})",
                    keyword,
                    tokenizer.line_number()
                );
                return;
            }
        };

        match directive {
            ObjDirective::MaterialLibrary => {
                let libraries: Vec<PathBuf> = tokenizer.remaining().map(PathBuf::from).collect();
                for library in libraries {
                    let materials = self.include(&library);
                    obj_buffer.merge_materials(materials);
                }
            }
            ObjDirective::UseMaterial => obj_buffer.use_material(tokenizer.read_str()),
            ObjDirective::Object => obj_buffer.select_mesh(tokenizer.read_str()),
            ObjDirective::Vertex => obj_buffer.pools.positions.push(tokenizer.read_vec3()),
            ObjDirective::VertexUv => obj_buffer.pools.uvs.push(tokenizer.read_vec2()),
            ObjDirective::VertexNormal => obj_buffer.pools.normals.push(tokenizer.read_vec3()),
            ObjDirective::Face => obj_buffer.add_face(tokenizer.remaining()),
            ObjDirective::SmoothingGroup => obj_buffer.smoothing_group = tokenizer.read_i32(),
        }
    }

    fn include(&mut self, library: &Path) -> Vec<Material> {
        match (self.include_function)(library) {
            Ok(reader) => read_library(reader, library.display()),
            Err(e) => {
                warn!(
                    "Failed to open material library {}: {}",
                    library.display(),
                    e
                );
                vec![]
            }
        }
    }
}

impl Parser<File> {
    /// Creates a parser which opens `mtllib` files from the file system.
    /// Library names are joined to `base_directory`, or used as given if it is `None`.
    pub fn with_base_directory(base_directory: Option<PathBuf>) -> Parser<File> {
        Parser::new(move |library| match &base_directory {
            Some(directory) => File::open(directory.join(library)),
            None => File::open(library),
        })
    }
}

/// Parses a material library. A read failure drops the library with a warning.
fn read_library(reader: impl Read, source: impl Display) -> Vec<Material> {
    match parse_mtl(reader) {
        Ok(materials) => {
            debug!("Loaded {} materials from {}", materials.len(), source);
            materials
        }
        Err(e) => {
            warn!("Failed to read material library {}: {}", source, e);
            vec![]
        }
    }
}

/// Running state of one OBJ parse.
#[derive(Debug)]
struct ObjBuffer {
    pools: AttributePools,
    meshes: Vec<Mesh>,
    mesh_indices: HashMap<String, usize>,
    default_mesh: Mesh,
    current_mesh: Option<usize>,
    materials: Vec<Arc<Material>>,
    material_indices: HashMap<String, usize>,
    current_material: Arc<Material>,
    smoothing_group: i32,
    face_buffer: FaceBuffer,
}

impl ObjBuffer {
    fn new() -> ObjBuffer {
        let fallback = Arc::new(Material::fallback());
        let mut material_indices = HashMap::new();
        material_indices.insert(fallback.name.clone(), 0);

        ObjBuffer {
            pools: AttributePools::default(),
            meshes: vec![],
            mesh_indices: HashMap::new(),
            default_mesh: Mesh::new(""),
            current_mesh: None,
            materials: vec![Arc::clone(&fallback)],
            material_indices,
            current_material: fallback,
            smoothing_group: -1,
            face_buffer: FaceBuffer::default(),
        }
    }

    /// Adds materials, replacing same-named ones in place.
    fn merge_materials(&mut self, materials: Vec<Material>) {
        for material in materials {
            let material = Arc::new(material);
            match self.material_indices.get(&material.name) {
                Some(&index) => self.materials[index] = material,
                None => {
                    self.material_indices
                        .insert(material.name.clone(), self.materials.len());
                    self.materials.push(material);
                }
            }
        }
    }

    fn select_mesh(&mut self, name: &str) {
        if let Some(&index) = self.mesh_indices.get(name) {
            self.current_mesh = Some(index);
            return;
        }

        debug!("New mesh: {}", name);
        let index = self.meshes.len();
        self.meshes.push(Mesh::new(name));
        self.mesh_indices.insert(name.to_owned(), index);
        self.current_mesh = Some(index);
    }

    fn use_material(&mut self, name: &str) {
        let index = match self.material_indices.get(name) {
            Some(&index) => index,
            None => {
                debug!("Unknown material {}, using the default", name);
                self.material_indices.get("").copied().unwrap_or(0)
            }
        };
        self.current_material = Arc::clone(&self.materials[index]);
    }

    fn add_face<'a>(&mut self, corners: impl IntoIterator<Item = &'a str>) {
        self.face_buffer.read_corners(corners, self.smoothing_group);
        let mesh = match self.current_mesh {
            Some(index) => &mut self.meshes[index],
            None => &mut self.default_mesh,
        };
        mesh.add_face(&mut self.face_buffer, &self.current_material, &self.pools);
    }

    fn into_collection(self) -> MeshCollection {
        let mut meshes = self.meshes;
        if !self.default_mesh.submeshes().is_empty() {
            meshes.push(self.default_mesh);
        }

        MeshCollection {
            name: String::new(),
            source_path: None,
            meshes,
            materials: self.materials,
        }
    }
}
