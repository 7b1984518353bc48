/// Source-over compositing and outline drawing
pub mod compositor;
/// Generation driver and brushstroke loop
pub mod executor;
/// Best-of-K placement search by divergence score
pub mod placement;
/// Seeded random stream
pub mod random;
/// Region color sampling over source and canvas
pub mod sampler;
