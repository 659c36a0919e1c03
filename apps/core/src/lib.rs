pub mod action_executor;
pub mod config;
pub mod contract;
pub mod core_service;
pub mod discovery;
pub mod logging;
pub mod model;
pub mod places_store;
pub mod query_builder;
pub mod result_mapper;
pub mod runtime;
pub mod search;
pub mod settings;
pub mod transport;

#[cfg(test)]
mod tests {
    mod query_latency_test {
        include!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../tests/perf/query_latency_test.rs"
        ));
    }
}
