#[cfg(feature="format")] pub mod custom;
pub(crate) mod iso;
