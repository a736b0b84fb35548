use std::sync::mpsc::{Receiver, Sender};
use std::thread;

use crate::analysis_fetch::run_analysis;
use crate::reference_fetch::fetch_reference;
use crate::state::{Delta, ProviderCommand};
use crate::transform::shape_analysis;

/// Live provider: serves commands against the analytics service, one at a
/// time, echoing back the seq so stale results can be fenced off.
pub fn spawn_provider(tx: Sender<Delta>, cmd_rx: Receiver<ProviderCommand>) {
    thread::spawn(move || {
        while let Ok(cmd) = cmd_rx.recv() {
            match cmd {
                ProviderCommand::FetchReference { seq, category } => {
                    let fetched = fetch_reference(category);
                    let delta = Delta::SetReference {
                        seq,
                        data: fetched.data,
                        errors: fetched.errors,
                    };
                    if tx.send(delta).is_err() {
                        return;
                    }
                }
                ProviderCommand::RunAnalysis { seq, request } => {
                    let delta = match run_analysis(&request) {
                        Ok(raw) => Delta::SetAnalysis {
                            seq,
                            view: shape_analysis(&raw),
                        },
                        Err(err) => Delta::AnalysisFailed {
                            seq,
                            error: format!("{err:#}"),
                        },
                    };
                    if tx.send(delta).is_err() {
                        return;
                    }
                }
            }
        }
    });
}
