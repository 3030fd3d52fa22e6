use crate::storage::{load_photos, save_photos};
use gloo_events::EventListener;
use gloo_file::futures::read_as_data_url;
use log::warn;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;
use yew::TargetCast;

/// Photos as data URLs plus the lightbox position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GalleryState {
    photos: Vec<String>,
    current: usize,
    open: bool,
}

pub enum GalleryAction {
    Add(String),
    Show(usize),
    Next,
    Previous,
    Close,
}

impl GalleryState {
    pub fn new(photos: Vec<String>) -> Self {
        Self {
            photos,
            ..Self::default()
        }
    }

    pub fn photos(&self) -> &[String] {
        &self.photos
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn current_photo(&self) -> Option<&str> {
        if !self.open {
            return None;
        }
        self.photos.get(self.current).map(String::as_str)
    }

    pub fn apply(&mut self, action: GalleryAction) {
        match action {
            GalleryAction::Add(photo) => self.photos.push(photo),
            GalleryAction::Show(index) => self.show(index),
            GalleryAction::Next => {
                if !self.photos.is_empty() {
                    self.show((self.current + 1) % self.photos.len());
                }
            }
            GalleryAction::Previous => {
                if !self.photos.is_empty() {
                    let len = self.photos.len();
                    self.show((self.current + len - 1) % len);
                }
            }
            GalleryAction::Close => self.open = false,
        }
    }

    /// Lightbox keys: Escape closes, the arrow keys step through photos.
    pub fn key_action(key: &str) -> Option<GalleryAction> {
        match key {
            "Escape" => Some(GalleryAction::Close),
            "ArrowLeft" => Some(GalleryAction::Previous),
            "ArrowRight" => Some(GalleryAction::Next),
            _ => None,
        }
    }

    fn show(&mut self, index: usize) {
        if index < self.photos.len() {
            self.current = index;
            self.open = true;
        }
    }
}

impl Reducible for GalleryState {
    type Action = GalleryAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        next.into()
    }
}

#[function_component(PhotoGallery)]
pub fn photo_gallery() -> Html {
    let gallery = use_reducer(|| GalleryState::new(load_photos()));

    {
        let count = gallery.photos().len();
        let gallery = gallery.clone();
        use_effect_with_deps(
            move |count: &usize| {
                if *count > 0 && save_photos(gallery.photos()).is_err() {
                    crate::alert("Storage is full. Some photos may not be saved.");
                }
                || ()
            },
            count,
        );
    }

    {
        let dispatcher = gallery.dispatcher();
        use_effect_with_deps(
            move |open: &bool| {
                let listener = match (*open, web_sys::window()) {
                    (true, Some(window)) => Some(EventListener::new(&window, "keydown", move |event| {
                        let Some(event) = event.dyn_ref::<KeyboardEvent>() else {
                            return;
                        };
                        if let Some(action) = GalleryState::key_action(&event.key()) {
                            dispatcher.dispatch(action);
                        }
                    })),
                    _ => None,
                };
                move || drop(listener)
            },
            gallery.is_open(),
        );
    }

    let on_upload = {
        let gallery = gallery.clone();
        Callback::from(move |event: Event| {
            let input: HtmlInputElement = event.target_unchecked_into();
            let Some(files) = input.files() else {
                return;
            };

            for file in gloo_file::FileList::from(files).iter() {
                if !file.raw_mime_type().starts_with("image/") {
                    continue;
                }

                let file = file.clone();
                let gallery = gallery.clone();
                spawn_local(async move {
                    match read_as_data_url(&file).await {
                        Ok(data_url) => gallery.dispatch(GalleryAction::Add(data_url)),
                        Err(err) => warn!("Failed to read photo: {}", err),
                    }
                });
            }
            input.set_value("");
        })
    };

    let dispatch = |action: fn() -> GalleryAction| {
        let gallery = gallery.clone();
        Callback::from(move |_: MouseEvent| gallery.dispatch(action()))
    };
    let on_previous = dispatch(|| GalleryAction::Previous);
    let on_next = dispatch(|| GalleryAction::Next);
    let on_close = dispatch(|| GalleryAction::Close);

    let thumbnails = gallery.photos().iter().enumerate().map(|(index, photo)| {
        let gallery = gallery.clone();
        let onclick = Callback::from(move |_: MouseEvent| gallery.dispatch(GalleryAction::Show(index)));
        html! { <img class="thumbnail" src={photo.clone()} onclick={onclick} /> }
    });

    html! {
        <section class="gallery">
            <label class="upload-label">
                { "Add photos" }
                <input type="file" accept="image/*" multiple={true} onchange={on_upload} />
            </label>
            <div class="thumbnails">
                { for thumbnails }
            </div>
            <div class={classes!("lightbox", gallery.is_open().then_some("active"))}>
                {
                    match gallery.current_photo() {
                        Some(photo) => html! { <img src={photo.to_string()} /> },
                        None => html! {},
                    }
                }
                <button class="lightbox-prev" onclick={on_previous}>{ "‹" }</button>
                <button class="lightbox-next" onclick={on_next}>{ "›" }</button>
                <button class="lightbox-close" onclick={on_close}>{ "×" }</button>
            </div>
        </section>
    }
}
