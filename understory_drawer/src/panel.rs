// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Declarative drawer panel.
//!
//! A [`Panel`] is the framework-facing surface: its open state is owned by the
//! application, which reports changes through [`Panel::set_open`] (or
//! [`Panel::update_props`]). Every transition returns the [`PanelEffects`] the
//! renderer has to perform, such as moving focus or shielding the rest of the
//! page, instead of mutating a document.
//!
//! Focus inside a panel is cycled by a [`TabSequencer`](understory_focus::TabSequencer)
//! over the controls the renderer reports on every Tab press.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

use smallvec::{SmallVec, smallvec};
use tracing::{debug, warn};
use understory_focus::{Key, KeyPress};

use crate::error::DrawerError;
use crate::types::Alignment;
use crate::views::{self, NavigationState, ViewNode};

/// Header and label text.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct DrawerText {
    /// Title shown in list mode.
    pub header_title: String,
    /// Screen-reader title.
    #[cfg_attr(feature = "serde", serde(rename = "headerTitleSR"))]
    pub header_title_sr: String,
    /// Screen-reader label of the close button.
    #[cfg_attr(feature = "serde", serde(rename = "closeButtonSRText"))]
    pub close_button_sr_text: String,
    /// Label of the back button.
    pub back_button_text: String,
}

impl Default for DrawerText {
    fn default() -> Self {
        Self {
            header_title: "Basic Title".into(),
            header_title_sr: "I'm a drawer".into(),
            close_button_sr_text: "Close".into(),
            back_button_text: "Back".into(),
        }
    }
}

/// Panel configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct DrawerProps {
    /// Unique id; also labels the drawer. Required.
    pub id: String,
    /// Side the panel slides in from.
    pub position: Alignment,
    /// CSS `top` offset.
    pub drawer_top: String,
    /// Detail view to open straight into; empty for the list.
    pub skip_to: String,
    /// Externally controlled open state.
    pub drawer_open: bool,
    /// Header and label text.
    pub text: DrawerText,
    /// Id of the element the panel is portaled into.
    pub portal_target: Option<String>,
    /// Id of the application root hidden from assistive tech while open. Required.
    pub app_root_id: String,
}

impl Default for DrawerProps {
    fn default() -> Self {
        Self {
            id: String::new(),
            position: Alignment::Right,
            drawer_top: "61px".into(),
            skip_to: String::new(),
            drawer_open: false,
            text: DrawerText::default(),
            portal_target: None,
            app_root_id: String::new(),
        }
    }
}

impl DrawerProps {
    /// Props with the two required ids and defaults elsewhere.
    pub fn new(id: impl Into<String>, app_root_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            app_root_id: app_root_id.into(),
            ..Self::default()
        }
    }

    /// Fail on empty required ids.
    pub fn validate(&self) -> Result<(), DrawerError> {
        if self.id.is_empty() {
            return Err(DrawerError::MissingProp("id"));
        }
        if self.app_root_id.is_empty() {
            return Err(DrawerError::MissingProp("appRootId"));
        }
        Ok(())
    }
}

/// Something the renderer must do after a panel transition.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PanelEffect<K> {
    /// Set `aria-hidden` on the application root.
    SetAppRootHidden(bool),
    /// Focus the close button.
    FocusCloseButton,
    /// Focus the back button.
    FocusBackButton,
    /// Focus a control reported by the renderer.
    Focus(K),
    /// Prevent the key's default action.
    PreventDefault,
}

/// Effects of one transition, in order.
pub type PanelEffects<K> = SmallVec<[PanelEffect<K>; 4]>;

/// Leading element of the header.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HeaderLead<'a> {
    /// The title (list mode).
    Title(&'a str),
    /// A back button with this label (detail mode).
    BackButton(&'a str),
}

/// What the header shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Header<'a> {
    /// Title or back button.
    pub lead: HeaderLead<'a>,
    /// Screen-reader title.
    pub title_sr: &'a str,
    /// Screen-reader label of the close button.
    pub close_label: &'a str,
    /// Whether the lead slides (only while open).
    pub animate: bool,
}

type OpenChangeHook = Box<dyn FnMut(bool)>;
type BasicClickHook<C> = Box<dyn FnMut(usize, &C)>;

/// Declarative drawer with master/detail content.
///
/// `K` identifies the focusable controls the renderer reports; `C` is the
/// content carried by each view.
pub struct Panel<K, C> {
    props: DrawerProps,
    views: Vec<ViewNode<String, C>>,
    nav: NavigationState<String>,
    open: bool,
    on_open_change: Option<OpenChangeHook>,
    on_basic_click: Option<BasicClickHook<C>>,
    _controls: PhantomData<fn() -> K>,
}

impl<K, C> fmt::Debug for Panel<K, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Panel")
            .field("props", &self.props)
            .field("views", &self.views.len())
            .field("nav", &self.nav)
            .field("open", &self.open)
            .finish_non_exhaustive()
    }
}

impl<K: Copy, C> Panel<K, C> {
    /// Create a closed panel.
    ///
    /// Fails when a required prop is missing. Content whose detail references
    /// do not resolve is accepted and logged.
    pub fn new(props: DrawerProps, views: Vec<ViewNode<String, C>>) -> Result<Self, DrawerError> {
        props.validate()?;
        if let Err(err) = views::validate(&views) {
            warn!(id = %props.id, %err, "drawer content does not resolve");
        }
        Ok(Self {
            props,
            views,
            nav: NavigationState::default(),
            open: false,
            on_open_change: None,
            on_basic_click: None,
            _controls: PhantomData,
        })
    }

    /// Builder: install the handler asked to change the open state.
    pub fn on_open_change(mut self, hook: impl FnMut(bool) + 'static) -> Self {
        self.on_open_change = Some(Box::new(hook));
        self
    }

    /// Builder: install the hook fired when a basic view is activated.
    pub fn on_basic_click(mut self, hook: impl FnMut(usize, &C) + 'static) -> Self {
        self.on_basic_click = Some(Box::new(hook));
        self
    }

    /// Apply the initial `drawer_open` prop.
    pub fn mount(&mut self) -> PanelEffects<K> {
        let open = self.props.drawer_open;
        self.set_open(open)
    }

    /// Current props.
    pub fn props(&self) -> &DrawerProps {
        &self.props
    }

    /// Replace the props; an open-state change is applied as a transition.
    pub fn update_props(&mut self, props: DrawerProps) -> Result<PanelEffects<K>, DrawerError> {
        props.validate()?;
        let open = props.drawer_open;
        self.props = props;
        Ok(self.set_open(open))
    }

    /// Whether the panel is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Navigation state.
    pub fn navigation(&self) -> &NavigationState<String> {
        &self.nav
    }

    /// All content, in order.
    pub fn views(&self) -> &[ViewNode<String, C>] {
        &self.views
    }

    /// Content rendered for the current navigation state.
    pub fn visible_views(&self) -> Vec<&ViewNode<String, C>> {
        views::visible_views(&self.views, &self.nav)
    }

    /// Header model for the current navigation state.
    pub fn header(&self) -> Header<'_> {
        let text = &self.props.text;
        Header {
            lead: if self.nav.back {
                HeaderLead::BackButton(&text.back_button_text)
            } else {
                HeaderLead::Title(&text.header_title)
            },
            title_sr: &text.header_title_sr,
            close_label: &text.close_button_sr_text,
            animate: self.open,
        }
    }

    /// Transition to `open`. No-op when already there.
    pub fn set_open(&mut self, open: bool) -> PanelEffects<K> {
        if open == self.open {
            return SmallVec::new();
        }
        self.open = open;
        self.props.drawer_open = open;
        if !open {
            self.nav.reset();
            debug!(id = %self.props.id, "panel closed");
            return smallvec![PanelEffect::SetAppRootHidden(false)];
        }
        debug!(id = %self.props.id, skip_to = %self.props.skip_to, "panel opened");
        let mut effects = smallvec![PanelEffect::SetAppRootHidden(true)];
        if self.props.skip_to.is_empty() {
            self.nav.reset();
            effects.push(PanelEffect::FocusCloseButton);
        } else {
            self.nav.select(self.props.skip_to.clone());
            effects.push(PanelEffect::FocusBackButton);
        }
        effects
    }

    /// Activate the basic view at `index` in [`Panel::views`].
    ///
    /// Ignored unless that view is currently rendered.
    pub fn select_basic(&mut self, index: usize) -> PanelEffects<K> {
        if self.nav.back {
            return SmallVec::new();
        }
        let Some(view) = self.views.get(index).filter(|v| v.is_basic()) else {
            return SmallVec::new();
        };
        if let Some(hook) = self.on_basic_click.as_mut() {
            hook(index, &view.content);
        }
        match view.detail_ref() {
            Some(detail) => {
                self.nav.select(detail.clone());
                smallvec![PanelEffect::FocusBackButton]
            }
            None => SmallVec::new(),
        }
    }

    /// Return to the list.
    pub fn back(&mut self) -> PanelEffects<K> {
        if !self.nav.back {
            return SmallVec::new();
        }
        self.nav.back();
        smallvec![PanelEffect::FocusCloseButton]
    }

    /// The close button was activated.
    ///
    /// With an open-change handler installed the request is forwarded to it and
    /// the application decides; without one the panel closes itself.
    pub fn request_close(&mut self) -> PanelEffects<K> {
        match self.on_open_change.as_mut() {
            Some(hook) => {
                hook(false);
                SmallVec::new()
            }
            None => self.set_open(false),
        }
    }

    /// Handle a key press while the panel holds focus.
    ///
    /// `controls` is the renderer's current list of focusable controls, in
    /// document order.
    pub fn handle_key(&mut self, press: KeyPress, controls: &[K]) -> PanelEffects<K> {
        if !self.open {
            return SmallVec::new();
        }
        match press.key {
            Key::Escape => self.request_close(),
            Key::Tab => {
                let mut effects = smallvec![PanelEffect::PreventDefault];
                let seq = self.nav.sequencer_mut();
                if let Some(idx) = press
                    .navigation()
                    .and_then(|nav| seq.step(nav, controls.len()))
                {
                    effects.push(PanelEffect::Focus(controls[idx]));
                }
                effects
            }
            Key::Other => SmallVec::new(),
        }
    }
}
