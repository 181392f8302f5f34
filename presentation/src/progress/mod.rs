//! Progress reporting for voting rounds

pub mod reporter;
