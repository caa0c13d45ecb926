mod file_dto;

pub use file_dto::{
    AuthorshipDto, DeleteFileDto, EditFileDto, FileDetailDto, FileResponseDto, ListFilesQuery,
};
