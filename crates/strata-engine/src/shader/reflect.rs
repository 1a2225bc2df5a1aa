//! WGSL front end: parsing, validation and interface reflection with naga.

use std::collections::BTreeMap;

use naga::valid::{Capabilities, ValidationFlags, Validator};
use naga::{AddressSpace, Binding, Handle, Module, Scalar, ShaderStage, Type, TypeInner, VectorSize};

use crate::backend::ShaderProgram;
use crate::error::ShaderError;

use super::source::ShaderSource;

/// Shape of a uniform global, as far as the 2D layout cares.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum UniformType {
    Mat4x4F32,
    Vec2F32,
    Other,
}

/// Resource slot of one uniform global.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct UniformSlot {
    pub group: u32,
    pub binding: u32,
    pub ty: UniformType,
}

/// Linked interface of a vertex + fragment program.
///
/// Attribute locations are the `@location` indices of the vertex entry point inputs.
/// Uniform locations are the `@binding` indices of `var<uniform>` globals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgramInterface {
    pub vertex_entry: String,
    pub fragment_entry: String,
    attributes: BTreeMap<String, u32>,
    uniforms: BTreeMap<String, UniformSlot>,
}

impl ProgramInterface {
    /// Parses, validates and links both stages of `source`.
    pub fn from_source(source: &ShaderSource) -> Result<Self, ShaderError> {
        let vertex = parse_stage("vertex", &source.vertex)?;
        let fragment = parse_stage("fragment", &source.fragment)?;
        link(&vertex, &fragment)
    }

    #[inline]
    pub fn uniform(&self, name: &str) -> Option<UniformSlot> {
        self.uniforms.get(name).copied()
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, u32)> + '_ {
        self.attributes.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn uniforms(&self) -> impl Iterator<Item = (&str, UniformSlot)> + '_ {
        self.uniforms.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl ShaderProgram for ProgramInterface {
    fn attribute_location(&self, name: &str) -> Option<u32> {
        self.attributes.get(name).copied()
    }

    fn uniform_location(&self, name: &str) -> Option<u32> {
        self.uniforms.get(name).map(|slot| slot.binding)
    }

    fn uniform_type(&self, name: &str) -> Option<UniformType> {
        self.uniforms.get(name).map(|slot| slot.ty)
    }
}

/// Parses and validates one WGSL module.
pub fn parse_stage(stage: &'static str, source: &str) -> Result<Module, ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError::Compile {
        stage,
        message: e.emit_to_string(source),
    })?;

    Validator::new(ValidationFlags::all(), Capabilities::all())
        .validate(&module)
        .map_err(|e| ShaderError::Validate {
            stage,
            message: e.emit_to_string(source),
        })?;

    Ok(module)
}

fn link(vs: &Module, fs: &Module) -> Result<ProgramInterface, ShaderError> {
    let vertex = vs
        .entry_points
        .iter()
        .find(|ep| ep.stage == ShaderStage::Vertex)
        .ok_or_else(|| ShaderError::Link("vertex module has no @vertex entry point".into()))?;
    let fragment = fs
        .entry_points
        .iter()
        .find(|ep| ep.stage == ShaderStage::Fragment)
        .ok_or_else(|| ShaderError::Link("fragment module has no @fragment entry point".into()))?;

    let mut inputs = Vec::new();
    for arg in &vertex.function.arguments {
        collect_locations(vs, arg.name.as_deref(), arg.ty, arg.binding.as_ref(), &mut inputs);
    }

    let mut produced = Vec::new();
    if let Some(result) = &vertex.function.result {
        collect_locations(vs, None, result.ty, result.binding.as_ref(), &mut produced);
    }

    let mut consumed = Vec::new();
    for arg in &fragment.function.arguments {
        collect_locations(fs, arg.name.as_deref(), arg.ty, arg.binding.as_ref(), &mut consumed);
    }
    for (name, location) in &consumed {
        if !produced.iter().any(|(_, l)| l == location) {
            return Err(ShaderError::Link(format!(
                "fragment input `{name}` at @location({location}) is not written by the vertex stage"
            )));
        }
    }

    let mut uniforms = BTreeMap::new();
    for module in [vs, fs] {
        for (_, global) in module.global_variables.iter() {
            if global.space != AddressSpace::Uniform {
                continue;
            }
            let (Some(name), Some(rb)) = (&global.name, &global.binding) else {
                continue;
            };
            let slot = UniformSlot {
                group: rb.group,
                binding: rb.binding,
                ty: classify(module, global.ty),
            };
            if let Some(prev) = uniforms.insert(name.clone(), slot) {
                if prev != slot {
                    return Err(ShaderError::Link(format!(
                        "uniform `{name}` is declared differently by the two stages"
                    )));
                }
            }
        }
    }

    Ok(ProgramInterface {
        vertex_entry: vertex.name.clone(),
        fragment_entry: fragment.name.clone(),
        attributes: inputs.into_iter().collect(),
        uniforms,
    })
}

/// Flattens `@location` bindings of an argument or result, descending into structs.
fn collect_locations(
    module: &Module,
    name: Option<&str>,
    ty: Handle<Type>,
    binding: Option<&Binding>,
    out: &mut Vec<(String, u32)>,
) {
    match binding {
        Some(Binding::Location { location, .. }) => {
            out.push((name.unwrap_or_default().to_owned(), *location));
        }
        Some(Binding::BuiltIn(_)) => {}
        None => {
            if let TypeInner::Struct { members, .. } = &module.types[ty].inner {
                for m in members {
                    collect_locations(module, m.name.as_deref(), m.ty, m.binding.as_ref(), out);
                }
            }
        }
    }
}

fn classify(module: &Module, ty: Handle<Type>) -> UniformType {
    match module.types[ty].inner {
        TypeInner::Matrix {
            columns: VectorSize::Quad,
            rows: VectorSize::Quad,
            scalar,
        } if scalar == Scalar::F32 => UniformType::Mat4x4F32,
        TypeInner::Vector {
            size: VectorSize::Bi,
            scalar,
        } if scalar == Scalar::F32 => UniformType::Vec2F32,
        _ => UniformType::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PASS_VS: &str = r#"
        @group(0) @binding(3) var<uniform> transformMatrix: mat4x4<f32>;

        struct Out {
            @builtin(position) clip: vec4<f32>,
            @location(0) tint: vec4<f32>,
        };

        @vertex
        fn main(@location(5) vertex: vec3<f32>, @location(2) color: vec4<f32>) -> Out {
            var o: Out;
            o.clip = transformMatrix * vec4<f32>(vertex, 1.0);
            o.tint = color;
            return o;
        }
    "#;

    const PASS_FS: &str = r#"
        @fragment
        fn main(@location(0) tint: vec4<f32>) -> @location(0) vec4<f32> {
            return tint;
        }
    "#;

    #[test]
    fn default_program_links() {
        let iface = ProgramInterface::from_source(&ShaderSource::default_2d()).unwrap();
        assert_eq!(iface.vertex_entry, "vs_main");
        assert_eq!(iface.fragment_entry, "fs_main");
        assert_eq!(iface.attribute_location("position"), Some(0));
        assert_eq!(iface.attribute_location("texFactor"), Some(3));
        assert_eq!(iface.uniform_location("texScale"), Some(1));
        assert_eq!(iface.uniform_type("transform"), Some(UniformType::Mat4x4F32));
    }

    #[test]
    fn reflects_locations_and_bindings() {
        let iface = ProgramInterface::from_source(&ShaderSource::new(PASS_VS, PASS_FS)).unwrap();
        assert_eq!(iface.attribute_location("vertex"), Some(5));
        assert_eq!(iface.attribute_location("color"), Some(2));
        assert_eq!(iface.attribute_location("tint"), None);
        assert_eq!(
            iface.uniform("transformMatrix"),
            Some(UniformSlot { group: 0, binding: 3, ty: UniformType::Mat4x4F32 })
        );
    }

    #[test]
    fn syntax_error_is_a_compile_error() {
        let err = ProgramInterface::from_source(&ShaderSource::new("fn (", PASS_FS)).unwrap_err();
        assert!(matches!(err, ShaderError::Compile { stage: "vertex", .. }), "{err}");
    }

    #[test]
    fn type_error_is_a_validation_error() {
        let bad_fs = r#"
            @fragment
            fn main() -> @location(0) vec4<f32> {
                let x: f32 = 1.0;
                return x;
            }
        "#;
        let err = ProgramInterface::from_source(&ShaderSource::new(PASS_VS, bad_fs)).unwrap_err();
        assert!(
            matches!(err, ShaderError::Compile { stage: "fragment", .. } | ShaderError::Validate { stage: "fragment", .. }),
            "{err}"
        );
    }

    #[test]
    fn missing_entry_point_fails_to_link() {
        let err = ProgramInterface::from_source(&ShaderSource::new(PASS_FS, PASS_FS)).unwrap_err();
        assert!(matches!(err, ShaderError::Link(_)), "{err}");
    }

    #[test]
    fn unmatched_varying_fails_to_link() {
        let fs = r#"
            @fragment
            fn main(@location(4) other: vec4<f32>) -> @location(0) vec4<f32> {
                return other;
            }
        "#;
        let err = ProgramInterface::from_source(&ShaderSource::new(PASS_VS, fs)).unwrap_err();
        assert!(matches!(&err, ShaderError::Link(msg) if msg.contains("@location(4)")), "{err}");
    }
}
