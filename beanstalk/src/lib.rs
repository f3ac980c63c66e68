//! Application bootstrapping based on [beanstalk_di] declarative bean definitions.
//!
//! An application describes its beans in a configuration file and lets the container create them.
//! This crate provides the entrypoint doing that in the form of
//! [Application](application::Application), which reads the definitions, creates eager singletons
//! and also configures supporting infrastructure, e.g. logging. The resulting
//! [ApplicationContext](context::ApplicationContext) gives access to created beans.

pub mod application;
pub mod config;
pub mod context;
pub mod logging;
