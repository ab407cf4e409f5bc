//! Adjacency navigation: locating a node and finding its pre-order
//! neighbours within its Exam.

mod locate;
mod resolver;


pub use locate::{LocateError, find, locate, locate_id, parse_slug_path};
pub use resolver::{Direction, NavError, NavResult, NavigationResolver, Walk};
