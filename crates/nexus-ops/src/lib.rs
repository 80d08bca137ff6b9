pub mod ops_upload;
