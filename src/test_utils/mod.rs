//! Test doubles and fixture builders shared by the unit tests.

#![cfg(test)]

pub mod config;
pub mod fake_session;
pub mod html;
