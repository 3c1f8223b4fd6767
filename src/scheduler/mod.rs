pub mod throttle_sweep;
