pub mod plot;

pub use plot::render_svg;
