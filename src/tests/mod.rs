mod support;
mod system_tests;
mod diagnostics_tests;
