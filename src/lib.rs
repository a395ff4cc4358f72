// SPDX-License-Identifier: Apache-2.0
pub mod config;
pub mod constants;
pub mod error;
pub mod facade;
pub mod invoker;
pub mod names;
pub mod request;
pub mod secrets;
pub mod server;
pub mod serving;
pub mod store;
pub mod template;

#[cfg(test)]
pub mod test_utils;
