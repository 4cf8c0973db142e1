// Observability: run counters recorded through the `metrics` facade

pub mod metrics;
