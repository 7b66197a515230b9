//! Waypoint Kernel: the value types every engine is built from.
//!
//! # API Surface
//!
//! - [`blocks`] -- Blocks World predicates, the world set, and the fixed operator schema table
//! - [`puzzle`] -- the 8-puzzle board, its heuristics, solvability, and a seedable generator
//! - [`river`] -- river-crossing states and the legal boat loads
//! - [`queens`] -- the N-Queens board and its safety check
//! - [`proof`] -- canonical JSON bytes and domain-separated content hashing
//!
//! # Module Dependency Direction
//!
//! The four domain modules are independent leaves. `proof` depends on nothing
//! internal; engines use it to digest their step logs.
//!
//! The kernel holds no engine logic: no frontier, no stack, no step counter.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod blocks;
pub mod proof;
pub mod puzzle;
pub mod queens;
pub mod river;
