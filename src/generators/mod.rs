//! Plain value generators implementing the generator contract.
//!
//! These are the leaf building blocks atomic datasets usually wrap: constant
//! values, uniform inclusive ranges, and inverse-transform samplers over a
//! cumulative distribution. Range and sampler generators own a seeded RNG
//! derived from the init context, so identical seeds replay identical
//! streams.

mod constant;
mod numeric;
mod sampler;

pub use constant::ConstantGenerator;
pub use numeric::{FloatRangeGenerator, IntRangeGenerator};
pub use sampler::DistributionSampler;
