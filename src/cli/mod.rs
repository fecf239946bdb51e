//! CLI infrastructure for training and playing against the agent

pub mod commands;
