pub mod boolean;
pub mod fracture;
pub mod intersects;
