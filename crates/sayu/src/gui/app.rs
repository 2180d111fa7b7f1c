use crate::config;
use crate::events::AppEvent;
use crate::gui::lock::GtkPointerLock;
use crate::gui::menu::{self, CommitHooks, DEFAULT_HEIGHT, DEFAULT_WIDTH, Session};
use crate::gui::theme::{self, ThemeColors};
use gdk4 as gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use relm4::prelude::*;
use sayu_core::{Menu, MenuItem, Point, Size, TriggerKey};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

const TRIGGER_KEYS: [(gdk::Key, TriggerKey); 11] = [
    (gdk::Key::Tab, TriggerKey::Tab),
    (gdk::Key::ISO_Left_Tab, TriggerKey::Tab),
    (gdk::Key::space, TriggerKey::Space),
    (gdk::Key::Alt_L, TriggerKey::Alt),
    (gdk::Key::Alt_R, TriggerKey::Alt),
    (gdk::Key::Control_L, TriggerKey::Control),
    (gdk::Key::Control_R, TriggerKey::Control),
    (gdk::Key::Shift_L, TriggerKey::Shift),
    (gdk::Key::Shift_R, TriggerKey::Shift),
    (gdk::Key::Super_L, TriggerKey::Super),
    (gdk::Key::Super_R, TriggerKey::Super),
];

fn trigger_key(key: gdk::Key) -> Option<TriggerKey> {
    TRIGGER_KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|&(_, trigger)| trigger)
}

pub struct AppModel {
    pub session: Rc<RefCell<Session<GtkPointerLock>>>,
    pub hooks: CommitHooks,
    pub config_path: PathBuf,
    pub drawing_area: gtk::DrawingArea,
}

#[derive(Debug)]
pub enum AppMsg {
    KeyPressed(TriggerKey),
    KeyReleased(TriggerKey),
    Motion(Point),
    Leave,
    Resize(i32, i32),
    ConfigReload,
    Committed(Option<MenuItem>),
}

impl From<AppEvent> for AppMsg {
    fn from(event: AppEvent) -> Self {
        match event {
            AppEvent::ConfigReload => AppMsg::ConfigReload,
            AppEvent::Committed(item) => AppMsg::Committed(item),
        }
    }
}

impl AppModel {
    fn reload(&mut self) {
        let new_config = match config::load_config(&self.config_path) {
            Ok(c) => c,
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                return;
            }
        };

        let mut session = self.session.borrow_mut();
        match Menu::new(new_config.menu, session.frames().clone()) {
            Ok(menu) => {
                session.reload(menu.with_hooks(self.hooks.clone()));
                log::info!("Configuration reloaded");
            }
            Err(e) => log::error!("Keeping previous menu, new config is invalid: {}", e),
        }
    }
}

#[relm4::component(pub)]
impl SimpleComponent for AppModel {
    type Init = (
        Menu,
        CommitHooks,
        PathBuf,
        async_channel::Receiver<AppEvent>,
    );
    type Input = AppMsg;
    type Output = ();

    view! {
        #[root]
        gtk::ApplicationWindow {
            set_title: Some("Sayu"),
            set_default_size: (DEFAULT_WIDTH, DEFAULT_HEIGHT),
            add_css_class: "sayu-window",

            add_controller = gtk::EventControllerKey {
                // ahead of focus traversal, which would swallow Tab
                set_propagation_phase: gtk::PropagationPhase::Capture,

                connect_key_pressed[sender] => move |_, key, _, _| {
                    match trigger_key(key) {
                        Some(trigger) => {
                            sender.input(AppMsg::KeyPressed(trigger));
                            glib::Propagation::Stop
                        }
                        None => glib::Propagation::Proceed,
                    }
                },

                connect_key_released[sender] => move |_, key, _, _| {
                    if let Some(trigger) = trigger_key(key) {
                        sender.input(AppMsg::KeyReleased(trigger));
                    }
                },
            },

            #[local_ref]
            drawing_area -> gtk::DrawingArea {
                set_hexpand: true,
                set_vexpand: true,
                set_focusable: true,
                add_css_class: "sayu-drawing-area",

                add_controller = gtk::EventControllerMotion {
                    connect_motion[sender] => move |_, x, y| {
                        sender.input(AppMsg::Motion(Point::new(x, y)));
                    },

                    connect_leave[sender] => move |_| {
                        sender.input(AppMsg::Leave);
                    },
                },

                connect_resize[sender] => move |_, width, height| {
                    sender.input(AppMsg::Resize(width, height));
                },
            }
        }
    }

    fn init(
        init: Self::Init,
        root: Self::Root,
        sender: ComponentSender<Self>,
    ) -> ComponentParts<Self> {
        let (menu, hooks, config_path, rx) = init;

        theme::load_css();

        let drawing_area = gtk::DrawingArea::new();
        let canvas = Size::new(DEFAULT_WIDTH as f64, DEFAULT_HEIGHT as f64);
        let session = Session::new(menu, GtkPointerLock::new(&drawing_area), canvas);

        let weak_area = drawing_area.downgrade();
        session.frames().set_scheduler(move || {
            if let Some(area) = weak_area.upgrade() {
                area.queue_draw();
            }
        });

        let model = AppModel {
            session: Rc::new(RefCell::new(session)),
            hooks,
            config_path,
            drawing_area: drawing_area.clone(),
        };

        let widgets = view_output!();

        let session_draw = model.session.clone();
        drawing_area.set_draw_func(move |area, cr, _, _| {
            let colors = ThemeColors::from_context(&area.style_context());
            let mut session = session_draw.borrow_mut();
            session.apply_frame();
            if let Err(e) = menu::draw(cr, &*session, &colors) {
                log::error!("Drawing error: {}", e);
            }
        });

        let sender_clone = sender.clone();
        relm4::spawn(async move {
            while let Ok(event) = rx.recv().await {
                sender_clone.input(AppMsg::from(event));
            }
        });

        drawing_area.grab_focus();

        ComponentParts { model, widgets }
    }

    fn update(&mut self, msg: Self::Input, _sender: ComponentSender<Self>) {
        match msg {
            AppMsg::KeyPressed(key) => self.session.borrow_mut().key_pressed(key),
            AppMsg::KeyReleased(key) => self.session.borrow_mut().key_released(key),
            AppMsg::Motion(point) => self.session.borrow_mut().motion(point),
            AppMsg::Leave => self.session.borrow_mut().leave(),
            AppMsg::Resize(width, height) => self
                .session
                .borrow_mut()
                .resize(width as f64, height as f64),
            AppMsg::ConfigReload => self.reload(),
            AppMsg::Committed(item) => {
                self.session.borrow_mut().committed(item);
                self.drawing_area.queue_draw();
            }
        }
    }
}
