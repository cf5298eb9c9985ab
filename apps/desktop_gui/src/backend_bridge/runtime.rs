//! Runtime bridge between the UI command queue and the fetch worker.

use crossbeam_channel::{Receiver, Sender};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub fn launch(server_url: String, cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>) {
    crate::ui::app::start_backend_bridge(server_url, cmd_rx, ui_tx);
}
