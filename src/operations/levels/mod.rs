mod normalize;

pub use normalize::NormalizeLevels;
