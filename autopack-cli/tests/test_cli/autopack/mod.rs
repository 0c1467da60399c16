mod archives;
mod cli_options;
mod conflicts;
mod errors;
