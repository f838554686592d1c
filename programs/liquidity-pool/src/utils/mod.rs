pub mod token_instructions;
