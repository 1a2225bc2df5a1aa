//! Binding resolution for the fixed 2D vertex layout.

use crate::backend::ShaderProgram;
use crate::error::ShaderError;

use super::reflect::UniformType;

/// Accepted names per attribute slot, tried in order.
const POSITION: &[&str] = &["position", "vertex"];
const COLOR: &[&str] = &["color"];
const TEX_COORD: &[&str] = &["texCoord"];
const TEX_FACTOR: &[&str] = &["texFactor"];

/// Accepted names per uniform slot, tried in order.
const TRANSFORM: &[&str] = &["transform", "transformMatrix"];
const TEX_SCALE: &[&str] = &["texScale"];

/// Attribute locations and uniform bindings of a program that can draw 2D batches.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct ShaderBindings {
    pub position: u32,
    pub color: u32,
    pub tex_coord: u32,
    pub tex_factor: u32,
    pub transform: u32,
    pub tex_scale: u32,
}

impl ShaderBindings {
    /// Whether `name` is one of the uniform names the 2D layout feeds.
    pub fn feeds_uniform(name: &str) -> bool {
        TRANSFORM.contains(&name) || TEX_SCALE.contains(&name)
    }

    /// Probes every slot of `program`.
    ///
    /// Fails with [`ShaderError::Incompatible`] naming each slot that has no binding under
    /// any accepted name (or whose uniform has the wrong type).
    pub fn resolve<P: ShaderProgram + ?Sized>(program: &P) -> Result<Self, ShaderError> {
        let mut missing = Vec::new();

        let mut attribute = |slot: &'static str, names: &[&str]| {
            let found = names.iter().find_map(|n| program.attribute_location(n));
            if found.is_none() {
                missing.push(slot);
            }
            found.unwrap_or_default()
        };
        let position = attribute("position", POSITION);
        let color = attribute("color", COLOR);
        let tex_coord = attribute("texCoord", TEX_COORD);
        let tex_factor = attribute("texFactor", TEX_FACTOR);

        let mut uniform = |slot: &'static str, names: &[&str], ty: UniformType| {
            let found = names.iter().find_map(|n| {
                let location = program.uniform_location(n)?;
                (program.uniform_type(n) == Some(ty)).then_some(location)
            });
            if found.is_none() {
                missing.push(slot);
            }
            found.unwrap_or_default()
        };
        let transform = uniform("transform", TRANSFORM, UniformType::Mat4x4F32);
        let tex_scale = uniform("texScale", TEX_SCALE, UniformType::Vec2F32);

        if !missing.is_empty() {
            return Err(ShaderError::Incompatible { missing });
        }

        Ok(Self {
            position,
            color,
            tex_coord,
            tex_factor,
            transform,
            tex_scale,
        })
    }
}
