//! .mtl ファイルで定義されるマテリアル情報と、そのパーサー。

use crate::{tokenizer::Tokenizer, Result};

use std::io::{prelude::*, BufReader};

use log::{trace, warn};
use ultraviolet::{Vec3, Vec4};

/// `illum` で指定される照明モデル。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IlluminationModel {
    /// 0: Constant color, `Kd` only.
    AmbientOff,

    /// 1: Lambertian diffuse with an ambient term.
    AmbientOn,

    /// 2: Diffuse plus Blinn-Phong specular highlight.
    HighlightOn,

    /// 3: Highlight with ray traced reflection.
    ReflectionRayTrace,

    /// 4: Glass with ray traced reflection.
    GlassRayTrace,

    /// 5: Fresnel reflection, ray traced.
    FresnelRayTrace,

    /// 6: Refraction without Fresnel, ray traced.
    RefractionRayTrace,

    /// 7: Refraction with Fresnel, ray traced.
    RefractionFresnelRayTrace,

    /// 8: Reflection without ray tracing.
    Reflection,

    /// 9: Glass without ray tracing.
    Glass,

    /// 10: Casts shadows onto invisible surfaces.
    ShadowOnInvisibleSurface,
}

impl IlluminationModel {
    /// Maps an `illum` number onto the model. Returns `None` outside `0..=10`.
    pub fn from_index(index: i32) -> Option<IlluminationModel> {
        let model = match index {
            0 => IlluminationModel::AmbientOff,
            1 => IlluminationModel::AmbientOn,
            2 => IlluminationModel::HighlightOn,
            3 => IlluminationModel::ReflectionRayTrace,
            4 => IlluminationModel::GlassRayTrace,
            5 => IlluminationModel::FresnelRayTrace,
            6 => IlluminationModel::RefractionRayTrace,
            7 => IlluminationModel::RefractionFresnelRayTrace,
            8 => IlluminationModel::Reflection,
            9 => IlluminationModel::Glass,
            10 => IlluminationModel::ShadowOnInvisibleSurface,
            _ => return None,
        };
        Some(model)
    }

    /// Returns the `illum` number of this model.
    pub fn index(self) -> i32 {
        self as i32
    }
}

/// `-imfchan` で指定されるチャンネル。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageChannel {
    Red,
    Green,
    Blue,
    Matte,
    Luminance,
    Depth,
}

impl ImageChannel {
    /// Parses a channel letter (`r`, `g`, `b`, `m`, `l`, `z`), ignoring case.
    pub fn from_token(token: &str) -> Option<ImageChannel> {
        let channel = match token.to_ascii_uppercase().as_str() {
            "R" => ImageChannel::Red,
            "G" => ImageChannel::Green,
            "B" => ImageChannel::Blue,
            "M" => ImageChannel::Matte,
            "L" => ImageChannel::Luminance,
            "Z" => ImageChannel::Depth,
            _ => return None,
        };
        Some(channel)
    }
}

/// `refl` の種別。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectionKind {
    Sphere,
    CubeTop,
    CubeBottom,
    CubeFront,
    CubeBack,
    CubeLeft,
    CubeRight,
}

impl ReflectionKind {
    /// Parses the `refl` sub-type. Expects a lower-cased token.
    pub fn from_token(token: &str) -> Option<ReflectionKind> {
        let kind = match token {
            "sphere" => ReflectionKind::Sphere,
            "cube_top" => ReflectionKind::CubeTop,
            "cube_bottom" => ReflectionKind::CubeBottom,
            "cube_front" => ReflectionKind::CubeFront,
            "cube_back" => ReflectionKind::CubeBack,
            "cube_left" => ReflectionKind::CubeLeft,
            "cube_right" => ReflectionKind::CubeRight,
            _ => return None,
        };
        Some(kind)
    }
}

/// テクスチャの参照とそのオプション。
/// 指定されていないオプションは `None` になる。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Texture {
    /// ファイル名 (MTL ファイルからの相対パス)
    pub filename: String,

    /// `-blendu`
    pub blend_u: Option<bool>,

    /// `-blendv`
    pub blend_v: Option<bool>,

    /// `-cc`
    pub color_correction: Option<bool>,

    /// `-clamp`
    pub clamp: Option<bool>,

    /// `-bm`
    pub bump_multiplier: Option<f32>,

    /// `-boost`
    pub boost: Option<f32>,

    /// `-mm` の base
    pub range_base: Option<f32>,

    /// `-mm` の gain
    pub range_gain: Option<f32>,

    /// `-o`
    pub offset: Option<Vec3>,

    /// `-s`
    pub scale: Option<Vec3>,

    /// `-t`
    pub turbulence: Option<Vec3>,

    /// `-texres`
    pub resolution: Option<i32>,

    /// `-imfchan`
    pub channel: Option<ImageChannel>,
}

/// `refl` で指定される反射マップ。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReflectionMaps {
    pub sphere: Option<Texture>,
    pub cube_top: Option<Texture>,
    pub cube_bottom: Option<Texture>,
    pub cube_front: Option<Texture>,
    pub cube_back: Option<Texture>,
    pub cube_left: Option<Texture>,
    pub cube_right: Option<Texture>,
}

impl ReflectionMaps {
    /// Returns the map bound to `kind`.
    pub fn get(&self, kind: ReflectionKind) -> Option<&Texture> {
        match kind {
            ReflectionKind::Sphere => self.sphere.as_ref(),
            ReflectionKind::CubeTop => self.cube_top.as_ref(),
            ReflectionKind::CubeBottom => self.cube_bottom.as_ref(),
            ReflectionKind::CubeFront => self.cube_front.as_ref(),
            ReflectionKind::CubeBack => self.cube_back.as_ref(),
            ReflectionKind::CubeLeft => self.cube_left.as_ref(),
            ReflectionKind::CubeRight => self.cube_right.as_ref(),
        }
    }

    fn slot_mut(&mut self, kind: ReflectionKind) -> &mut Option<Texture> {
        match kind {
            ReflectionKind::Sphere => &mut self.sphere,
            ReflectionKind::CubeTop => &mut self.cube_top,
            ReflectionKind::CubeBottom => &mut self.cube_bottom,
            ReflectionKind::CubeFront => &mut self.cube_front,
            ReflectionKind::CubeBack => &mut self.cube_back,
            ReflectionKind::CubeLeft => &mut self.cube_left,
            ReflectionKind::CubeRight => &mut self.cube_right,
        }
    }
}

/// .mtl ファイルで定義されるマテリアル情報を表す。
/// 色は RGBA で、アルファは常に 1.0 になる。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Material {
    /// マテリアル名
    pub name: String,

    /// `Ka`
    pub ambient_color: Option<Vec4>,

    /// `Kd`
    pub diffuse_color: Option<Vec4>,

    /// `Ks`
    pub specular_color: Option<Vec4>,

    /// `Tf`
    pub transmission_filter: Option<Vec4>,

    /// `d` または `1 - Tr`
    pub dissolve: Option<f32>,

    /// `d -halo`
    pub halo: Option<bool>,

    /// `Ns`
    pub specular_exponent: Option<f32>,

    /// `Ni`
    pub optical_density: Option<f32>,

    /// `sharpness`
    pub sharpness: Option<f32>,

    /// `illum`
    pub illumination: Option<IlluminationModel>,

    /// `map_aat`
    pub anti_aliasing: Option<bool>,

    /// `map_Ka`
    pub ambient_map: Option<Texture>,

    /// `map_Kd`
    pub diffuse_map: Option<Texture>,

    /// `map_Ks`
    pub specular_map: Option<Texture>,

    /// `map_Ns`
    pub specular_exponent_map: Option<Texture>,

    /// `map_d`
    pub dissolve_map: Option<Texture>,

    /// `decal`
    pub decal: Option<Texture>,

    /// `disp`
    pub displacement: Option<Texture>,

    /// `bump`, `map_bump`
    pub bump_map: Option<Texture>,

    /// `refl`
    pub reflection: ReflectionMaps,
}

impl Material {
    /// Creates a material with every attribute unset.
    pub fn new(name: impl Into<String>) -> Material {
        Material {
            name: name.into(),
            ..Default::default()
        }
    }

    /// The unnamed material faces fall back to when no `usemtl` applies.
    pub fn fallback() -> Material {
        Material {
            diffuse_color: Some(Vec4::new(0.8, 0.8, 0.8, 1.0)),
            dissolve: Some(1.0),
            illumination: Some(IlluminationModel::HighlightOn),
            ..Material::new("")
        }
    }

    fn color_mut(&mut self, slot: ColorSlot) -> &mut Option<Vec4> {
        match slot {
            ColorSlot::Ambient => &mut self.ambient_color,
            ColorSlot::Diffuse => &mut self.diffuse_color,
            ColorSlot::Specular => &mut self.specular_color,
            ColorSlot::TransmissionFilter => &mut self.transmission_filter,
        }
    }

    fn map_mut(&mut self, slot: MapSlot) -> &mut Option<Texture> {
        match slot {
            MapSlot::Ambient => &mut self.ambient_map,
            MapSlot::Diffuse => &mut self.diffuse_map,
            MapSlot::Specular => &mut self.specular_map,
            MapSlot::SpecularExponent => &mut self.specular_exponent_map,
            MapSlot::Dissolve => &mut self.dissolve_map,
            MapSlot::Decal => &mut self.decal,
            MapSlot::Displacement => &mut self.displacement,
            MapSlot::Bump => &mut self.bump_map,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorSlot {
    Ambient,
    Diffuse,
    Specular,
    TransmissionFilter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MapSlot {
    Ambient,
    Diffuse,
    Specular,
    SpecularExponent,
    Dissolve,
    Decal,
    Displacement,
    Bump,
}

/// Represents the keyword of a material property line in MTL file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MtlDirective {
    /// `Ka`, `Kd`, `Ks`, `Tf`
    Color(ColorSlot),

    /// `d`
    Dissolve,

    /// `Tr`
    Transparency,

    /// `Ns`
    SpecularExponent,

    /// `sharpness`
    Sharpness,

    /// `Ni`
    OpticalDensity,

    /// `illum`
    Illumination,

    /// `map_*`, `decal`, `disp`, `bump`
    Map(MapSlot),

    /// `refl`
    Reflection,

    /// `map_aat`
    AntiAliasing,
}

impl MtlDirective {
    /// Expects a lower-cased keyword.
    fn from_keyword(keyword: &str) -> Option<MtlDirective> {
        let directive = match keyword {
            "ka" => MtlDirective::Color(ColorSlot::Ambient),
            "kd" => MtlDirective::Color(ColorSlot::Diffuse),
            "ks" => MtlDirective::Color(ColorSlot::Specular),
            "tf" => MtlDirective::Color(ColorSlot::TransmissionFilter),
            "d" => MtlDirective::Dissolve,
            "tr" => MtlDirective::Transparency,
            "ns" => MtlDirective::SpecularExponent,
            "sharpness" => MtlDirective::Sharpness,
            "ni" => MtlDirective::OpticalDensity,
            "illum" => MtlDirective::Illumination,
            "map_ka" => MtlDirective::Map(MapSlot::Ambient),
            "map_kd" => MtlDirective::Map(MapSlot::Diffuse),
            "map_ks" => MtlDirective::Map(MapSlot::Specular),
            "map_ns" => MtlDirective::Map(MapSlot::SpecularExponent),
            "map_d" => MtlDirective::Map(MapSlot::Dissolve),
            "decal" => MtlDirective::Map(MapSlot::Decal),
            "disp" => MtlDirective::Map(MapSlot::Displacement),
            "bump" | "map_bump" => MtlDirective::Map(MapSlot::Bump),
            "refl" => MtlDirective::Reflection,
            "map_aat" => MtlDirective::AntiAliasing,
            _ => return None,
        };
        Some(directive)
    }
}

#[derive(Debug, Default)]
struct MtlBuffer {
    current: Option<Material>,
    complete_materials: Vec<Material>,
}

impl MtlBuffer {
    fn commit_material(&mut self) {
        if let Some(material) = self.current.take() {
            self.complete_materials.push(material);
        }
    }

    fn into_materials(mut self) -> Vec<Material> {
        self.commit_material();
        self.complete_materials
    }
}

/// .mtl ファイルをパースする。
/// The reader will be wrapped with `BufReader`, so you don't have to
/// do so.
///
/// Materials are returned in definition order. A name defined twice appears
/// twice; deduplication happens where the libraries are merged.
pub fn parse_mtl(reader: impl Read) -> Result<Vec<Material>> {
    let mut tokenizer = Tokenizer::new(BufReader::new(reader));
    let mut mtl_buffer = MtlBuffer::default();

    while tokenizer.advance()? {
        if !tokenizer.has_directive() {
            continue;
        }
        process_mtl_line(&mut mtl_buffer, &mut tokenizer);
    }

    Ok(mtl_buffer.into_materials())
}

fn process_mtl_line<R>(mtl_buffer: &mut MtlBuffer, tokenizer: &mut Tokenizer<R>) {
    let keyword = tokenizer.read_str().to_ascii_lowercase();
    if keyword == "newmtl" {
        mtl_buffer.commit_material();
        mtl_buffer.current = Some(Material::new(tokenizer.read_str()));
        return;
    }

    let directive = match MtlDirective::from_keyword(&keyword) {
        Some(d) => d,
        None => {
            trace!("Unsupported MTL keyword: {}", keyword);
            return;
        }
    };
    let material = match mtl_buffer.current.as_mut() {
        Some(m) => m,
        None => return,
    };
    match directive {
        MtlDirective::Color(slot) => {
            *material.color_mut(slot) = Some(read_color(tokenizer));
        }
        MtlDirective::Dissolve => {
            let has_halo = tokenizer
                .peek()
                .map_or(false, |t| t.eq_ignore_ascii_case("-halo"));
            if has_halo {
                tokenizer.read_str();
                material.halo = Some(true);
            }
            material.dissolve = Some(tokenizer.read_f32());
        }
        MtlDirective::Transparency => {
            material.dissolve = Some(1.0 - tokenizer.read_f32());
        }
        MtlDirective::SpecularExponent => {
            material.specular_exponent = Some(tokenizer.read_f32());
        }
        MtlDirective::Sharpness => {
            material.sharpness = Some(tokenizer.read_f32());
        }
        MtlDirective::OpticalDensity => {
            material.optical_density = Some(tokenizer.read_f32());
        }
        MtlDirective::Illumination => {
            let index = tokenizer.read_i32();
            match IlluminationModel::from_index(index) {
                Some(model) => material.illumination = Some(model),
                None => warn!(
                    "Unknown illumination model {} in material \"{}\" (line {})",
                    index,
                    material.name,
                    tokenizer.line_number()
                ),
            }
        }
        MtlDirective::Map(slot) => {
            *material.map_mut(slot) = Some(parse_texture(tokenizer));
        }
        MtlDirective::Reflection => {
            let mut kind = tokenizer.read_str().to_ascii_lowercase();
            if kind == "-type" {
                kind = tokenizer.read_str().to_ascii_lowercase();
            }
            match ReflectionKind::from_token(&kind) {
                Some(kind) => {
                    *material.reflection.slot_mut(kind) = Some(parse_texture(tokenizer));
                }
                None => trace!("Unsupported reflection type: {}", kind),
            }
        }
        MtlDirective::AntiAliasing => {
            material.anti_aliasing = Some(tokenizer.read_str().eq_ignore_ascii_case("on"));
        }
    }
}

/// Reads `r [g b]`. A single component is a gray shorthand.
fn read_color<R>(tokenizer: &mut Tokenizer<R>) -> Vec4 {
    let r = tokenizer.read_f32();
    let g = if tokenizer.is_exhausted() {
        r
    } else {
        tokenizer.read_f32()
    };
    let b = if tokenizer.is_exhausted() {
        r
    } else {
        tokenizer.read_f32()
    };
    Vec4::new(r, g, b, 1.0)
}

/// Consumes the rest of the line as texture options and a filename.
fn parse_texture<R>(tokenizer: &mut Tokenizer<R>) -> Texture {
    let mut texture = Texture::default();

    while !tokenizer.is_exhausted() {
        let token = tokenizer.read_str().to_owned();
        match token.to_ascii_lowercase().as_str() {
            "-blendu" => texture.blend_u = Some(read_switch(tokenizer)),
            "-blendv" => texture.blend_v = Some(read_switch(tokenizer)),
            "-cc" => texture.color_correction = Some(read_switch(tokenizer)),
            "-clamp" => texture.clamp = Some(read_switch(tokenizer)),
            "-bm" => texture.bump_multiplier = Some(tokenizer.read_f32()),
            "-boost" => texture.boost = Some(tokenizer.read_f32()),
            "-texres" => texture.resolution = Some(tokenizer.read_i32()),
            "-imfchan" => texture.channel = ImageChannel::from_token(tokenizer.read_str()),
            "-mm" => {
                texture.range_base = Some(tokenizer.read_f32());
                texture.range_gain = Some(tokenizer.read_f32());
            }
            "-o" => texture.offset = Some(tokenizer.read_vec3()),
            "-s" => texture.scale = Some(tokenizer.read_vec3()),
            "-t" => texture.turbulence = Some(tokenizer.read_vec3()),
            _ => texture.filename = token,
        }
    }

    texture
}

fn read_switch<R>(tokenizer: &mut Tokenizer<R>) -> bool {
    tokenizer.read_str() == "on"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn parse(text: &str) -> Vec<Material> {
        parse_mtl(Cursor::new(text)).unwrap()
    }

    fn parse_one(text: &str) -> Material {
        let mut materials = parse(text);
        assert_eq!(materials.len(), 1);
        materials.remove(0)
    }

    #[test]
    fn monochrome_color_shorthand() {
        let material = parse_one("newmtl gray\nKd 0.5\n");
        assert_eq!(material.diffuse_color, Some(Vec4::new(0.5, 0.5, 0.5, 1.0)));
        assert_eq!(material.ambient_color, None);
    }

    #[test]
    fn full_and_partial_colors() {
        let material = parse_one(
            "newmtl m\nKa 0.1 0.2 0.3\nKs 0.4 0.6\nTf 1 0 1 0.5\n",
        );
        assert_eq!(material.ambient_color, Some(Vec4::new(0.1, 0.2, 0.3, 1.0)));
        assert_eq!(material.specular_color, Some(Vec4::new(0.4, 0.6, 0.4, 1.0)));
        assert_eq!(
            material.transmission_filter,
            Some(Vec4::new(1.0, 0.0, 1.0, 1.0))
        );
    }

    #[test]
    fn dissolve_and_halo() {
        let halo = parse_one("newmtl a\nd -halo 0.3\n");
        assert_eq!(halo.halo, Some(true));
        assert_eq!(halo.dissolve, Some(0.3));

        let plain = parse_one("newmtl b\nd 0.3\n");
        assert_eq!(plain.halo, None);
        assert_eq!(plain.dissolve, Some(0.3));

        let upper = parse_one("newmtl c\nD -HALO 0.5\n");
        assert_eq!(upper.halo, Some(true));
        assert_eq!(upper.dissolve, Some(0.5));
    }

    #[test]
    fn transparency_inverts_into_dissolve() {
        let material = parse_one("newmtl m\nTr 0.25\n");
        assert_eq!(material.dissolve, Some(0.75));
    }

    #[test]
    fn scalars_and_illumination() {
        let material = parse_one(
            "newmtl m\nNs 96.078431\nNi 1.45\nsharpness 60\nillum 7\nmap_aat ON\n",
        );
        assert_eq!(material.specular_exponent, Some(96.078431));
        assert_eq!(material.optical_density, Some(1.45));
        assert_eq!(material.sharpness, Some(60.0));
        assert_eq!(
            material.illumination,
            Some(IlluminationModel::RefractionFresnelRayTrace)
        );
        assert_eq!(material.anti_aliasing, Some(true));
        assert_eq!(material.illumination.map(IlluminationModel::index), Some(7));
    }

    #[test]
    fn illumination_index_round_trips() {
        for index in 0..=10 {
            let model = IlluminationModel::from_index(index).unwrap();
            assert_eq!(model.index(), index);
        }
    }

    #[test]
    fn byte_order_mark_before_first_material() {
        let materials = parse("\u{feff}newmtl first\nNs 4\nnewmtl second\n");
        let names: Vec<_> = materials.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
        assert_eq!(materials[0].specular_exponent, Some(4.0));
    }

    #[test]
    fn out_of_range_illumination_stays_unset() {
        let material = parse_one("newmtl m\nillum 11\n");
        assert_eq!(material.illumination, None);

        let material = parse_one("newmtl m\nillum -1\n");
        assert_eq!(material.illumination, None);
    }

    #[test]
    fn texture_options_and_filename() {
        let material = parse_one(
            "newmtl m\n\
             map_Kd -blendu off -blendv on -clamp on -cc on -o 0.1 0.2 0.3 -s 2 2 1 -t 0 0 0 -mm 0.5 1.5 -texres 512 diffuse.png\n\
             bump -bm 0.8 -imfchan l -boost 2 normal.tga\n",
        );

        let diffuse = material.diffuse_map.unwrap();
        assert_eq!(diffuse.filename, "diffuse.png");
        assert_eq!(diffuse.blend_u, Some(false));
        assert_eq!(diffuse.blend_v, Some(true));
        assert_eq!(diffuse.clamp, Some(true));
        assert_eq!(diffuse.color_correction, Some(true));
        assert_eq!(diffuse.offset, Some(Vec3::new(0.1, 0.2, 0.3)));
        assert_eq!(diffuse.scale, Some(Vec3::new(2.0, 2.0, 1.0)));
        assert_eq!(diffuse.turbulence, Some(Vec3::new(0.0, 0.0, 0.0)));
        assert_eq!(diffuse.range_base, Some(0.5));
        assert_eq!(diffuse.range_gain, Some(1.5));
        assert_eq!(diffuse.resolution, Some(512));
        assert_eq!(diffuse.bump_multiplier, None);

        let bump = material.bump_map.unwrap();
        assert_eq!(bump.filename, "normal.tga");
        assert_eq!(bump.bump_multiplier, Some(0.8));
        assert_eq!(bump.boost, Some(2.0));
        assert_eq!(bump.channel, Some(ImageChannel::Luminance));
    }

    #[test]
    fn last_plain_token_is_the_filename() {
        let material = parse_one("newmtl m\nmap_Ks first.png second.png\n");
        assert_eq!(material.specular_map.unwrap().filename, "second.png");
    }

    #[test]
    fn unknown_channel_leaves_channel_unset() {
        let material = parse_one("newmtl m\nmap_d -imfchan q alpha.png\n");
        let dissolve = material.dissolve_map.unwrap();
        assert_eq!(dissolve.channel, None);
        assert_eq!(dissolve.filename, "alpha.png");
    }

    #[test]
    fn texture_slots() {
        let material = parse_one(
            "newmtl m\nmap_Ka a.png\nmap_Ns ns.png\ndecal d.png\ndisp h.png\nmap_bump b.png\n",
        );
        assert_eq!(material.ambient_map.unwrap().filename, "a.png");
        assert_eq!(material.specular_exponent_map.unwrap().filename, "ns.png");
        assert_eq!(material.decal.unwrap().filename, "d.png");
        assert_eq!(material.displacement.unwrap().filename, "h.png");
        assert_eq!(material.bump_map.unwrap().filename, "b.png");
    }

    #[test]
    fn reflection_maps() {
        let material = parse_one(
            "newmtl m\nrefl sphere -mm 0 1 sky.png\nrefl -type cube_left left.png\nrefl cylinder c.png\n",
        );
        let sphere = material.reflection.get(ReflectionKind::Sphere).unwrap();
        assert_eq!(sphere.filename, "sky.png");
        assert_eq!(sphere.range_gain, Some(1.0));
        assert_eq!(
            material
                .reflection
                .get(ReflectionKind::CubeLeft)
                .map(|t| t.filename.as_str()),
            Some("left.png")
        );
        assert_eq!(material.reflection.get(ReflectionKind::CubeRight), None);
    }

    #[test]
    fn lines_before_first_material_are_ignored() {
        let materials = parse("Kd 1 0 0\nillum 1\n# comment\nnewmtl only\nillum\nNs 10\n");
        assert_eq!(materials.len(), 1);
        let material = &materials[0];
        assert_eq!(material.name, "only");
        assert_eq!(material.diffuse_color, None);
        assert_eq!(material.illumination, None);
        assert_eq!(material.specular_exponent, Some(10.0));
    }

    #[test]
    fn keys_are_case_insensitive_and_unknown_keys_ignored() {
        let material = parse_one("NEWMTL m\nKD 1 0 0\nPr 0.5\nMAP_KD tex.png\n");
        assert_eq!(material.name, "m");
        assert_eq!(material.diffuse_color, Some(Vec4::new(1.0, 0.0, 0.0, 1.0)));
        assert_eq!(material.diffuse_map.unwrap().filename, "tex.png");
    }

    #[test]
    fn duplicate_names_are_all_returned() {
        let materials = parse("newmtl a\nNs 1\nnewmtl b\nnewmtl a\nNs 2\n");
        let names: Vec<_> = materials.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b", "a"]);
        assert_eq!(materials[2].specular_exponent, Some(2.0));
    }

    #[test]
    fn fallback_material() {
        let material = Material::fallback();
        assert_eq!(material.name, "");
        assert_eq!(material.diffuse_color, Some(Vec4::new(0.8, 0.8, 0.8, 1.0)));
        assert_eq!(material.dissolve, Some(1.0));
        assert_eq!(material.illumination, Some(IlluminationModel::HighlightOn));
        assert_eq!(material.ambient_color, None);
    }
}
