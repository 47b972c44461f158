pub mod s3_presigner;
