//! .obj ファイルのメッシュ構造と、面の取り込み処理。

use crate::mtl::Material;

use std::{collections::HashMap, sync::Arc};

use ultraviolet::{Vec2, Vec3};

/// 面の頂点を一意に識別するキー。
/// インデックスは .obj 上の 1 始まりの値そのままで、0 は「指定なし」を表す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexKey {
    pub position: i32,
    pub uv: i32,
    pub normal: i32,
    pub smoothing_group: i32,
}

impl VertexKey {
    /// Parses a face corner such as `1`, `1/2`, `1//3` or `1/2/3`.
    /// Empty or unparseable fields read as 0, fields after the third are ignored.
    pub fn parse(corner: &str, smoothing_group: i32) -> VertexKey {
        let mut fields = corner.split('/').map(|s| s.parse::<i32>().unwrap_or(0));
        VertexKey {
            position: fields.next().unwrap_or(0),
            uv: fields.next().unwrap_or(0),
            normal: fields.next().unwrap_or(0),
            smoothing_group,
        }
    }
}

/// 三角形。インデックスは所属する `Mesh` の頂点配列を指す。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle(pub usize, pub usize, pub usize);

impl Triangle {
    pub fn indices(&self) -> [usize; 3] {
        [self.0, self.1, self.2]
    }
}

/// 同じマテリアルが割り当てられた三角形の集まり。
#[derive(Debug, Clone)]
pub struct Submesh {
    material: Arc<Material>,
    triangles: Vec<Triangle>,
    has_missing_normals: bool,
}

impl Submesh {
    fn new(material: Arc<Material>) -> Submesh {
        Submesh {
            material,
            triangles: vec![],
            has_missing_normals: false,
        }
    }

    /// このサブメッシュのマテリアルを返す。
    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn material_name(&self) -> &str {
        &self.material.name
    }

    /// 三角形を出現順に返す。
    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles
    }

    /// 法線が指定されていない(または範囲外の)頂点を含むかどうかを返す。
    pub fn has_missing_normals(&self) -> bool {
        self.has_missing_normals
    }
}

/// `o` / `g` で区切られたメッシュ。
/// 頂点は (位置, UV, 法線, スムージンググループ) の組ごとに一つだけ保持される。
#[derive(Debug, Clone)]
pub struct Mesh {
    name: String,
    positions: Vec<Vec3>,
    normals: Vec<Vec3>,
    uvs: Vec<Vec2>,
    smoothing_groups: Vec<i32>,
    submeshes: Vec<Submesh>,
    submesh_indices: HashMap<String, usize>,
    vertex_indices: HashMap<VertexKey, usize>,
}

impl Mesh {
    pub(crate) fn new(name: impl Into<String>) -> Mesh {
        Mesh {
            name: name.into(),
            positions: vec![],
            normals: vec![],
            uvs: vec![],
            smoothing_groups: vec![],
            submeshes: vec![],
            submesh_indices: HashMap::new(),
            vertex_indices: HashMap::new(),
        }
    }

    /// このメッシュの名前を返す。暗黙のメッシュは空文字列。
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    pub fn uvs(&self) -> &[Vec2] {
        &self.uvs
    }

    pub fn smoothing_groups(&self) -> &[i32] {
        &self.smoothing_groups
    }

    /// Returns the number of deduplicated vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// サブメッシュを最初に使われた順に返す。
    pub fn submeshes(&self) -> &[Submesh] {
        &self.submeshes
    }

    /// マテリアル名からサブメッシュを返す。
    pub fn submesh(&self, material_name: &str) -> Option<&Submesh> {
        self.submesh_indices
            .get(material_name)
            .map(|&i| &self.submeshes[i])
    }

    pub fn triangle_count(&self) -> usize {
        self.submeshes.iter().map(|s| s.triangles.len()).sum()
    }

    /// Ingests one polygon, resolving its corners against `pools`.
    /// Faces with fewer than three corners are dropped.
    pub(crate) fn add_face(
        &mut self,
        face: &mut FaceBuffer,
        material: &Arc<Material>,
        pools: &AttributePools,
    ) {
        if face.corners.len() < 3 {
            return;
        }

        let submesh_index = self.submesh_index(material);
        let mut missing_normals = false;
        face.indices.clear();
        for &key in &face.corners {
            if pools.normal(key.normal).is_none() {
                missing_normals = true;
            }
            face.indices.push(self.resolve_vertex(key, pools));
        }

        let submesh = &mut self.submeshes[submesh_index];
        if missing_normals {
            submesh.has_missing_normals = true;
        }
        triangulate(&face.indices, &mut submesh.triangles);
    }

    fn submesh_index(&mut self, material: &Arc<Material>) -> usize {
        if let Some(&index) = self.submesh_indices.get(&material.name) {
            return index;
        }

        let index = self.submeshes.len();
        self.submeshes.push(Submesh::new(Arc::clone(material)));
        self.submesh_indices.insert(material.name.clone(), index);
        index
    }

    fn resolve_vertex(&mut self, key: VertexKey, pools: &AttributePools) -> usize {
        if let Some(&index) = self.vertex_indices.get(&key) {
            return index;
        }

        let index = self.positions.len();
        self.positions
            .push(pools.position(key.position).unwrap_or_else(Vec3::zero));
        self.uvs.push(pools.uv(key.uv).unwrap_or_else(Vec2::zero));
        self.normals
            .push(pools.normal(key.normal).unwrap_or_else(Vec3::zero));
        self.smoothing_groups.push(key.smoothing_group);
        self.vertex_indices.insert(key, index);
        index
    }
}

/// ファイル全体で共有される `v` / `vt` / `vn` の配列。
#[derive(Debug, Clone, Default)]
pub(crate) struct AttributePools {
    pub(crate) positions: Vec<Vec3>,
    pub(crate) normals: Vec<Vec3>,
    pub(crate) uvs: Vec<Vec2>,
}

impl AttributePools {
    fn position(&self, index: i32) -> Option<Vec3> {
        lookup(&self.positions, index)
    }

    fn uv(&self, index: i32) -> Option<Vec2> {
        lookup(&self.uvs, index)
    }

    fn normal(&self, index: i32) -> Option<Vec3> {
        lookup(&self.normals, index)
    }
}

/// 1 始まりのインデックスで参照する。範囲外なら `None`。
fn lookup<T: Copy>(pool: &[T], index: i32) -> Option<T> {
    if index <= 0 {
        return None;
    }
    pool.get(index as usize - 1).copied()
}

/// Scratch storage for one `f` line, reused across faces.
#[derive(Debug, Default)]
pub(crate) struct FaceBuffer {
    corners: Vec<VertexKey>,
    indices: Vec<usize>,
}

impl FaceBuffer {
    pub(crate) fn read_corners<'a>(
        &mut self,
        corners: impl IntoIterator<Item = &'a str>,
        smoothing_group: i32,
    ) {
        self.corners.clear();
        self.corners.extend(
            corners
                .into_iter()
                .map(|corner| VertexKey::parse(corner, smoothing_group)),
        );
    }
}

/// Splits a polygon into triangles.
/// Quads become `(a, b, c), (c, d, a)`; larger polygons fan from the first
/// corner, emitted from the far end inward.
pub(crate) fn triangulate(indices: &[usize], triangles: &mut Vec<Triangle>) {
    match *indices {
        [a, b, c] => triangles.push(Triangle(a, b, c)),
        [a, b, c, d] => {
            triangles.push(Triangle(a, b, c));
            triangles.push(Triangle(c, d, a));
        }
        _ if indices.len() > 4 => {
            let anchor = indices[0];
            for k in (1..indices.len() - 1).rev() {
                triangles.push(Triangle(anchor, indices[k], indices[k + 1]));
            }
        }
        _ => (),
    }
}
