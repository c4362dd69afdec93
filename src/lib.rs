pub mod camera;
pub mod config;
pub mod hittable;
pub mod material;
pub mod ray;
pub mod render;
pub mod scenes;
pub mod vec3;
