mod directive_definition_tests;
mod directive_owner_tests;
mod test_utils;
