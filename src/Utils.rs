/// plain text export and import of numeric grids
pub mod grid_io;
pub mod logger;
