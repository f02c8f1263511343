use common::requests::{ActionResponse, AdminData, BrowsedFile};

use super::helpers::FetchError;
use super::state::{Overlay, Panel};

pub enum Msg {
    RefreshTick,
    DataArrived(Result<AdminData, FetchError>),
    ToggleCard(String),
    SetPanel(Panel),
    FilesArrived(Result<Vec<BrowsedFile>, FetchError>),
    OpenOverlay(Overlay),
    DismissOverlay,
    EditPicker(PickerEdit),
    /// Executes whatever the active overlay proposes (reprint or delete).
    ConfirmOverlay,
    ReprintFinished(Result<ActionResponse, FetchError>),
    DeleteFinished(Result<ActionResponse, FetchError>),
    VisibilityChanged { hidden: bool },
}

/// A single edit to the options of the active reprint picker.
#[derive(Clone, Copy)]
pub enum PickerEdit {
    Copies(u32),
    Color(bool),
    Duplex(bool),
}
