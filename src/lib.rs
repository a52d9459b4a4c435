//!
//! # scalargrad
//!
//! Reverse-mode automatic differentiation over scalar values.
//!
//! Arithmetic and nonlinear operations on a tracked [`Value`] record nodes
//! in a DAG owned by a [`Graph`]; a single backward sweep over that graph
//! computes the gradient of a chosen output with respect to every value
//! that contributed to it, including diamond-shaped sharing of
//! sub-expressions.
//!
//! The [`nn`] module composes graph leaves into neurons, layers, and
//! multilayer perceptrons on top of the engine.
//!
//! ```
//! use scalargrad::Graph;
//!
//! let g = Graph::new();
//! let x = g.leaf(3.0);
//! let y = g.leaf(5.0);
//! let z = x * y + x;
//! z.backward();
//! assert_eq!(x.grad(), 6.0);
//! assert_eq!(y.grad(), 3.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod graph;
pub mod nn;

pub use error::{Error, Result};
pub use graph::{Graph, Op, Value};
