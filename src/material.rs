use std::collections::HashMap;

use id_arena::{Arena, Id};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const GREEN: Color = Color::rgb(0.0, 1.0, 0.0);

    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    #[allow(dead_code)]
    pub fn is_translucent(&self) -> bool {
        self.a < 1.0
    }
}

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillMode {
    #[default]
    Solid,
    Wireframe,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub name: String,
    pub color: Color,
    pub fill_mode: FillMode,
}

impl Material {
    pub fn from_color(name: impl Into<String>, color: Color) -> Self {
        Self {
            name: name.into(),
            color,
            fill_mode: FillMode::Solid,
        }
    }

    pub fn wireframe(mut self) -> Self {
        self.fill_mode = FillMode::Wireframe;
        self
    }
}

pub type MaterialId = Id<Material>;

/// Owns every material in the scene. Named materials are shared, so asking
/// for the same name twice yields the same id.
pub struct MaterialManager {
    materials: Arena<Material>,
    materials_by_name: HashMap<String, MaterialId>,
}

impl MaterialManager {
    pub fn new() -> Self {
        Self {
            materials: Arena::new(),
            materials_by_name: HashMap::new(),
        }
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        let name = material.name.clone();
        let id = self.materials.alloc(material);
        self.materials_by_name.insert(name, id);
        id
    }

    #[allow(dead_code)]
    pub fn get(&self, id: MaterialId) -> Option<&Material> {
        self.materials.get(id)
    }

    pub fn get_by_name(&self, name: &str) -> Option<MaterialId> {
        self.materials_by_name.get(name).copied()
    }

    pub fn get_or_add(&mut self, name: &str, create: impl FnOnce() -> Material) -> MaterialId {
        match self.get_by_name(name) {
            Some(id) => id,
            None => self.add_material(create()),
        }
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.materials.len()
    }
}
