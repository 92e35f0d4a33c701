//! Parses the Wavefront OBJ format and its MTL material libraries into
//! deduplicated, triangulated meshes.
//!
//! Parsing is lenient: malformed numbers read as zero, out-of-range indices
//! resolve to zero vectors, and unknown directives are skipped. The only fatal
//! conditions are a missing OBJ file and an I/O failure on the OBJ stream.

mod mtl;
mod obj;
mod parser;
mod tokenizer;

pub use mtl::{
    parse_mtl, IlluminationModel, ImageChannel, Material, ReflectionKind, ReflectionMaps, Texture,
};
pub use obj::{Mesh, Submesh, Triangle, VertexKey};
pub use parser::Parser;
pub use tokenizer::Tokenizer;

use std::{
    error::Error as StdError,
    fmt::{Display, Formatter, Result as FmtResult},
    fs::File,
    io::{prelude::*, Error as IoError},
    path::{Path, PathBuf},
    sync::Arc,
};

use log::{debug, warn};

/// Represents an error in parsing OBJ/MTL.
#[derive(Debug)]
pub enum Error {
    /// Specified OBJ file was not found.
    PathNotFound(PathBuf),

    /// Reading the OBJ stream failed.
    Io(IoError),
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Error::PathNotFound(path) => write!(f, "Path not found: {}", path.display()),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Error::PathNotFound(_) => None,
            Error::Io(e) => Some(e),
        }
    }
}

impl From<IoError> for Error {
    fn from(e: IoError) -> Error {
        Error::Io(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Wavefront OBJ の内容を表す。
#[derive(Debug, Clone)]
pub struct MeshCollection {
    name: String,
    source_path: Option<PathBuf>,
    meshes: Vec<Mesh>,
    materials: Vec<Arc<Material>>,
}

impl MeshCollection {
    /// OBJ ファイル名 (拡張子なし) を返す。ストリームから読んだ場合は空文字列。
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// 全てのメッシュを返す。暗黙のメッシュがあれば最後に入る。
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes
    }

    /// 全てのマテリアルを返す。先頭は名前が空のデフォルトマテリアル。
    pub fn materials(&self) -> &[Arc<Material>] {
        &self.materials
    }

    pub fn mesh(&self, name: &str) -> Option<&Mesh> {
        self.meshes.iter().find(|m| m.name() == name)
    }

    pub fn material(&self, name: &str) -> Option<&Material> {
        self.materials
            .iter()
            .find(|m| m.name == name)
            .map(|m| &**m)
    }

    /// Splits into meshes and materials.
    pub fn split(self) -> (Vec<Mesh>, Vec<Arc<Material>>) {
        (self.meshes, self.materials)
    }
}

/// Parses an OBJ stream. `mtllib` names are opened as given.
pub fn load(reader: impl Read) -> Result<MeshCollection> {
    Parser::with_base_directory(None).parse(reader)
}

/// Parses an OBJ stream along with a material library stream.
pub fn load_with_materials(reader: impl Read, material_reader: impl Read) -> Result<MeshCollection> {
    Parser::with_base_directory(None).parse_with_materials(reader, material_reader)
}

/// Loads an OBJ file. `mtllib` names are resolved against the directory of `filename`.
///
/// `material_filename` is an extra MTL file merged before the OBJ's own libraries.
/// If it does not exist, the OBJ is loaded without it.
pub fn load_file(
    filename: impl AsRef<Path>,
    material_filename: Option<&Path>,
) -> Result<MeshCollection> {
    let filename = filename.as_ref();
    if !filename.is_file() {
        return Err(Error::PathNotFound(filename.to_owned()));
    }

    let obj_file = File::open(filename)?;
    let mut parser = Parser::with_base_directory(filename.parent().map(Path::to_path_buf));
    let mut collection = match material_filename {
        Some(path) if path.is_file() => match File::open(path) {
            Ok(mtl_file) => parser.parse_with_materials(obj_file, mtl_file)?,
            Err(e) => {
                warn!("Failed to open {}: {}", path.display(), e);
                parser.parse(obj_file)?
            }
        },
        Some(path) => {
            debug!("Material file {} does not exist", path.display());
            parser.parse(obj_file)?
        }
        None => parser.parse(obj_file)?,
    };

    collection.name = filename
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    collection.source_path = Some(filename.to_owned());
    Ok(collection)
}
