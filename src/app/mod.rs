// Collaborators around the core: input parsing, terminal output, history export.

pub mod dashboard;
pub mod export;
pub mod form;
