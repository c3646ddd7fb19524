pub mod accounts;
pub mod parsed_files;

pub use accounts::AccountService;
pub use parsed_files::ParsedFileService;
