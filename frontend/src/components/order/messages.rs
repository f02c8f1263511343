use common::model::options::{ColorMode, PageMode, PaperSize, Siding};
use common::requests::{ActionResponse, JobStatusResponse, SummaryResponse, UploadResponse};

pub enum Msg {
    IdentityChanged(String),
    OpenFilePicker,
    FilesSelected(Vec<web_sys::File>),
    UploadFinished {
        task_id: String,
        result: Result<UploadResponse, String>,
    },
    PollTick,
    PollArrived(JobStatusResponse),
    PollFailed(String),
    RemoveTask(String),
    EditOption { task_id: String, edit: OptionEdit },
    RequestSummary,
    SummaryArrived(Result<SummaryResponse, String>),
    DismissSummary,
    ConfirmPrint,
    PrintFinished(Result<ActionResponse, String>),
    VisibilityChanged { hidden: bool },
    DismissBanner,
}

/// A single edit to one task's print options, applied synchronously.
#[derive(Clone, Copy)]
pub enum OptionEdit {
    Copies(u32),
    Color(ColorMode),
    Siding(Siding),
    Paper(PaperSize),
    Mode(PageMode),
    StartPage(Option<u32>),
    EndPage(Option<u32>),
}
