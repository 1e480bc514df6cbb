pub mod fs_archive;

pub use fs_archive::FsZoneArchive;
