pub mod icc;
