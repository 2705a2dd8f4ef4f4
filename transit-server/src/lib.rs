//! Transit mode recommender server.
//!
//! A web application that answers: "I want to get from here to there,
//! should I take the bus, the metro, a ride-share or a taxi?"

pub mod domain;
pub mod model;
pub mod recommend;
pub mod routing;
pub mod web;
