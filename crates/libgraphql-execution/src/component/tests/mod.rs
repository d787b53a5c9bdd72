mod component_kind_tests;
mod execution_error_tests;
