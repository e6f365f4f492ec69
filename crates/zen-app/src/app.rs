//! Main egui application — composes the panels and drives the focus
//! controller, study books and chat assistant.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use egui::{self, CentralPanel, RichText, SidePanel, TopBottomPanel};

use zen_core::chat::ChatAssistant;
use zen_core::event_bus::EventBus;
use zen_core::focus::{FocusController, dispatch_guidance};
use zen_core::guidance::LlmGuidance;
use zen_core::notes::NoteBook;
use zen_core::ports::{GuidancePort, LlmPort, StoragePort};
use zen_core::quotes::{QUOTE_ROTATE_MS, QuoteRotator};
use zen_core::tasks::TaskBook;
use zen_platform::audio::WebAudioCue;
use zen_platform::llm::OpenAiCompatProvider;
use zen_platform::spawner::WasmSpawner;
use zen_platform::storage::{auto_detect_storage, open_storage};
use zen_platform::ticker::SecondTicker;
use zen_types::Result;
use zen_types::config::{AppConfig, StorageBackendType};
use zen_ui::panels::{
    FocusAction, NoteAction, SaveFeedback, SettingsAction, TaskAction, chat_panel,
    dashboard_panel, focus_panel, notes_panel, settings_panel, tasks_panel,
};
use zen_ui::state::{FocusForm, Tab, UiState};
use zen_ui::theme;

const CONFIG_STORAGE_KEY: &str = "studyzen:config";

/// Everything loaded asynchronously at start-up
struct Boot {
    config_storage: Rc<dyn StoragePort>,
    data_storage: Rc<dyn StoragePort>,
    config: Option<AppConfig>,
    tasks: TaskBook,
    notes: NoteBook,
}

/// The main application state
pub struct StudyZenApp {
    ui_state: UiState,
    config: AppConfig,
    event_bus: EventBus,
    controller: Rc<RefCell<FocusController>>,
    chat: Rc<RefCell<ChatAssistant>>,
    llm: Rc<dyn LlmPort>,
    guidance: Rc<dyn GuidancePort>,
    ticker: SecondTicker,
    quotes: QuoteRotator,
    last_quote_at: f64,
    tasks: TaskBook,
    notes: NoteBook,
    config_storage: Option<Rc<dyn StoragePort>>,
    data_storage: Option<Rc<dyn StoragePort>>,
    boot_slot: Rc<RefCell<Option<Boot>>>,
    save_feedback: Option<SaveFeedback>,
    first_frame: bool,
}

impl StudyZenApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::default();
        let event_bus = EventBus::new();

        let llm: Rc<dyn LlmPort> = Rc::new(OpenAiCompatProvider::new(config.llm.clone()));
        let guidance: Rc<dyn GuidancePort> = Rc::new(LlmGuidance::new(llm.clone()));
        let controller = FocusController::new(Rc::new(WebAudioCue::new()), event_bus.clone());

        let boot_slot = Rc::new(RefCell::new(None));
        Self::start_boot(boot_slot.clone(), cc.egui_ctx.clone());

        Self {
            ui_state: UiState::new(),
            config,
            event_bus: event_bus.clone(),
            controller: Rc::new(RefCell::new(controller)),
            chat: Rc::new(RefCell::new(ChatAssistant::new(event_bus))),
            llm,
            guidance,
            ticker: SecondTicker::new(),
            quotes: QuoteRotator::new(),
            last_quote_at: 0.0,
            tasks: TaskBook::new(),
            notes: NoteBook::new(),
            config_storage: None,
            data_storage: None,
            boot_slot,
            save_feedback: None,
            first_frame: true,
        }
    }

    /// Open storage, restore config and load tasks and notes (async)
    fn start_boot(slot: Rc<RefCell<Option<Boot>>>, ctx: egui::Context) {
        wasm_bindgen_futures::spawn_local(async move {
            match boot().await {
                Ok(loaded) => {
                    *slot.borrow_mut() = Some(loaded);
                    ctx.request_repaint();
                }
                Err(e) => log::error!("Start-up failed: {}", e),
            }
        });
    }

    fn install_boot(&mut self, boot: Boot) {
        if let Some(config) = boot.config {
            self.ui_state.focus_form = FocusForm::from_defaults(&config.focus);
            self.config = config;
            self.apply_config();
        }
        self.tasks = boot.tasks;
        self.notes = boot.notes;
        log::info!(
            "Loaded {} tasks and {} notes from {}",
            self.tasks.len(),
            self.notes.len(),
            boot.data_storage.backend_name()
        );
        self.config_storage = Some(boot.config_storage);
        self.data_storage = Some(boot.data_storage);
    }

    fn apply_config(&mut self) {
        self.llm = Rc::new(OpenAiCompatProvider::new(self.config.llm.clone()));
        self.guidance = Rc::new(LlmGuidance::new(self.llm.clone()));
        self.controller
            .borrow_mut()
            .set_muted(self.config.focus.muted);
    }

    /// Save config to storage (async, fire-and-forget)
    fn save_config(&self) {
        let Some(storage) = self.config_storage.clone() else {
            log::warn!("Config not saved: storage not ready");
            return;
        };
        match serde_json::to_vec(&self.config) {
            Ok(json) => wasm_bindgen_futures::spawn_local(async move {
                match storage.set(CONFIG_STORAGE_KEY, &json).await {
                    Ok(()) => log::info!("Config saved to storage"),
                    Err(e) => log::warn!("Config save failed: {}", e),
                }
            }),
            Err(e) => log::warn!("Config not serializable: {}", e),
        }
    }

    fn save_tasks(&self) {
        let Some(storage) = self.data_storage.clone() else {
            return;
        };
        let snapshot = self.tasks.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = snapshot.save(storage.as_ref()).await {
                log::warn!("Saving tasks failed: {}", e);
            }
        });
    }

    fn save_notes(&self) {
        let Some(storage) = self.data_storage.clone() else {
            return;
        };
        let snapshot = self.notes.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Err(e) = snapshot.save(storage.as_ref()).await {
                log::warn!("Saving notes failed: {}", e);
            }
        });
    }

    /// Run the ticker exactly while the session is counting down.
    fn sync_ticker(&mut self, ctx: &egui::Context) {
        let counting = self.controller.borrow().state().is_counting();
        if counting && !self.ticker.is_running() {
            let controller = Rc::downgrade(&self.controller);
            let ctx = ctx.clone();
            self.ticker.start(move || {
                if let Some(controller) = controller.upgrade() {
                    controller.borrow_mut().tick();
                }
                ctx.request_repaint();
            });
        } else if !counting && self.ticker.is_running() {
            self.ticker.stop();
        }
    }

    fn rotate_quote(&mut self, ctx: &egui::Context) {
        let now = ctx.input(|i| i.time);
        let period = f64::from(QUOTE_ROTATE_MS) / 1000.0;
        if now - self.last_quote_at >= period {
            if self.last_quote_at > 0.0 {
                self.quotes.advance();
            }
            self.last_quote_at = now;
        }
        ctx.request_repaint_after(Duration::from_millis(u64::from(QUOTE_ROTATE_MS)));
    }

    fn handle_focus(&mut self, action: FocusAction) {
        match action {
            FocusAction::None => {}
            FocusAction::Start(config) => {
                let result = self.controller.borrow_mut().start(config);
                self.ui_state.focus_form.error = result.err().map(|e| e.to_string());
            }
            FocusAction::TogglePause => self.controller.borrow_mut().toggle_pause(),
            FocusAction::Reset => self.controller.borrow_mut().reset(),
            FocusAction::ToggleMute => {
                self.config.focus.muted = self.controller.borrow_mut().toggle_mute();
                self.save_config();
            }
        }
    }

    fn handle_task(&mut self, action: TaskAction) {
        let result = match action {
            TaskAction::None => return,
            TaskAction::Save(task) => self.tasks.save_task(task),
            TaskAction::Delete(id) => self.tasks.delete(&id).map(|_| ()),
            TaskAction::ToggleComplete(id) => self.tasks.toggle_complete(&id).map(|_| ()),
        };
        match result {
            Ok(()) => self.save_tasks(),
            Err(e) => self.ui_state.task_form.error = Some(e.to_string()),
        }
    }

    fn handle_note(&mut self, action: NoteAction) {
        let result = match action {
            NoteAction::None => return,
            NoteAction::Create { title, content } => {
                self.notes.create(&title, &content).map(|_| ())
            }
            NoteAction::Update { id, title, content } => self.notes.update(&id, &title, &content),
            NoteAction::Delete(id) => self.notes.delete(&id).map(|_| ()),
        };
        match result {
            Ok(()) => {
                self.ui_state.note_form.clear();
                self.save_notes();
            }
            Err(e) => self.ui_state.note_form.error = Some(e.to_string()),
        }
    }

    fn handle_settings(&mut self, action: SettingsAction) {
        match action {
            SettingsAction::None => {}
            SettingsAction::Changed => self.save_feedback = None,
            SettingsAction::SaveClicked => {
                self.apply_config();
                self.save_config();
                let message = if self.config.storage.backend == StorageBackendType::Auto {
                    "Settings saved".to_string()
                } else {
                    "Settings saved. Storage change applies after reload.".to_string()
                };
                self.save_feedback = Some(SaveFeedback {
                    message,
                    success: true,
                });
            }
        }
    }

    /// Send a chat line to the assistant (async)
    fn dispatch_chat(&self, text: String, ctx: &egui::Context) {
        let Some(query) = self.chat.borrow_mut().submit(&text) else {
            return;
        };
        let chat = self.chat.clone();
        let llm = self.llm.clone();
        let ctx = ctx.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let reply = query.send(llm.as_ref()).await;
            chat.borrow_mut().complete(reply);
            ctx.request_repaint();
        });
    }

    fn select_tab(&mut self, tab: Tab) {
        if tab == Tab::Chat {
            self.chat.borrow_mut().open();
        }
        self.ui_state.tab = tab;
    }
}

impl eframe::App for StudyZenApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.first_frame {
            theme::apply_theme(ctx);
            self.first_frame = false;
        }

        let booted = self.boot_slot.borrow_mut().take();
        if let Some(boot) = booted {
            self.install_boot(boot);
        }

        // Guidance requests queued by the last action or tick
        dispatch_guidance(&self.controller, &self.guidance, &WasmSpawner);

        if self.event_bus.has_pending() {
            self.ui_state.process_events(self.event_bus.drain());
            ctx.request_repaint();
        }

        self.sync_ticker(ctx);
        self.rotate_quote(ctx);

        let session = self.controller.borrow().state();
        let muted = self.controller.borrow().is_muted();

        // ── Top bar ──────────────────────────────────────────
        TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("StudyZen")
                        .strong()
                        .color(theme::ACCENT)
                        .size(16.0),
                );
                ui.separator();
                ui.label(
                    RichText::new(&self.ui_state.status_text)
                        .color(theme::TEXT_SECONDARY)
                        .small(),
                );
                if session.phase.is_live() {
                    ui.separator();
                    ui.label(
                        RichText::new(format!(
                            "{} {}",
                            session.phase.label(),
                            session.format_remaining()
                        ))
                        .color(theme::phase_color(session.phase))
                        .monospace(),
                    );
                }
            });
        });

        // ── Navigation ───────────────────────────────────────
        SidePanel::left("nav_panel")
            .resizable(false)
            .exact_width(150.0)
            .show(ctx, |ui| {
                ui.add_space(8.0);
                for tab in Tab::all() {
                    if ui
                        .selectable_label(self.ui_state.tab == *tab, tab.label())
                        .clicked()
                    {
                        self.select_tab(*tab);
                    }
                }
            });

        // ── Main content ─────────────────────────────────────
        CentralPanel::default().show(ctx, |ui| {
            if let Some(toast) = self.ui_state.toast.clone() {
                let color = if toast.is_error { theme::ERROR } else { theme::SUCCESS };
                ui.horizontal(|ui| {
                    ui.label(RichText::new(&toast.title).color(color).strong());
                    ui.label(RichText::new(&toast.description).color(theme::TEXT_PRIMARY));
                    if ui.small_button("✕").clicked() {
                        self.ui_state.dismiss_toast();
                    }
                });
                ui.separator();
            }

            let loading = self.data_storage.is_none()
                && matches!(self.ui_state.tab, Tab::Tasks | Tab::Notes);
            if loading {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label("Loading...");
                });
                return;
            }

            match self.ui_state.tab {
                Tab::Dashboard => {
                    let today = chrono::Local::now().date_naive();
                    let due = self.tasks.due_on(today);
                    if let Some(tab) =
                        dashboard_panel(ui, self.quotes.current(), &due, &session)
                    {
                        self.select_tab(tab);
                    }
                }
                Tab::Tasks => {
                    let action = tasks_panel(ui, &self.tasks, &mut self.ui_state.task_form);
                    self.handle_task(action);
                }
                Tab::Notes => {
                    let action = notes_panel(ui, &self.notes, &mut self.ui_state.note_form);
                    self.handle_note(action);
                }
                Tab::Focus => {
                    let action =
                        focus_panel(ui, &session, muted, &mut self.ui_state.focus_form);
                    self.handle_focus(action);
                }
                Tab::Chat => {
                    let entries = self.chat.borrow().entries().to_vec();
                    if let Some(text) = chat_panel(ui, &entries, &mut self.ui_state) {
                        self.dispatch_chat(text, ctx);
                    }
                }
                Tab::Settings => {
                    let action = settings_panel(
                        ui,
                        &mut self.config,
                        self.save_feedback.as_ref(),
                    );
                    self.handle_settings(action);
                }
            }
        });
    }
}

async fn boot() -> Result<Boot> {
    let config_storage = auto_detect_storage().await?;

    let config = match config_storage.get(CONFIG_STORAGE_KEY).await {
        Ok(Some(data)) => match serde_json::from_slice::<AppConfig>(&data) {
            Ok(config) => {
                log::info!("Config restored from storage");
                Some(config)
            }
            Err(e) => {
                log::warn!("Stored config unreadable, using defaults: {}", e);
                None
            }
        },
        Ok(None) => None,
        Err(e) => {
            log::warn!("Config restore failed: {}", e);
            None
        }
    };

    let data_storage = match config.as_ref().map(|c| &c.storage.backend) {
        None | Some(StorageBackendType::Auto) => config_storage.clone(),
        Some(backend) => open_storage(backend).await.unwrap_or_else(|e| {
            log::warn!("Selected storage unavailable ({}), using default", e);
            config_storage.clone()
        }),
    };

    let tasks = TaskBook::load(data_storage.as_ref())
        .await
        .unwrap_or_else(|e| {
            log::warn!("Loading tasks failed: {}", e);
            TaskBook::new()
        });
    let notes = NoteBook::load(data_storage.as_ref())
        .await
        .unwrap_or_else(|e| {
            log::warn!("Loading notes failed: {}", e);
            NoteBook::new()
        });

    Ok(Boot {
        config_storage,
        data_storage,
        config,
        tasks,
        notes,
    })
}
