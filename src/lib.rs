pub mod import_inspector;
