//! Test suite for the profiles API
//!
//! This module organizes all tests
