//! The story engine: navigation state, click dispatch, and restart.

use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::config::StoryConfig;
use crate::error::{StoryError, StoryResult};
use crate::event::{ClickTarget, UiEvent};
use crate::hook::{HookId, Navigation, NavigationHook};
use crate::passage::Passage;
use crate::registry::PassageRegistry;
use crate::state::{StoryState, Variables};
use crate::surface::{HeadlessSurface, Surface};

/// Single source of truth for where the reader is in a story.
///
/// The engine owns the story state and the passage registry. Passages are
/// looked up by name at navigation time, so they can be registered before
/// or after the choices that point at them.
///
/// All mutation goes through `&mut self`; a host that shares an engine
/// across threads wraps it in a `Mutex` to keep navigation atomic.
#[derive(Debug)]
pub struct StoryEngine {
    config: StoryConfig,
    state: StoryState,
    registry: PassageRegistry,
    surface: Box<dyn Surface>,
    hooks: Vec<(HookId, Box<dyn NavigationHook>)>,
    next_hook_id: u64,
    /// Number of attached click listeners.
    listeners: usize,
}

impl StoryEngine {
    /// Create an engine with an empty registry and a headless surface.
    ///
    /// An empty start passage name falls back to the default.
    pub fn new(mut config: StoryConfig) -> Self {
        if config.start_passage.is_empty() {
            warn!("empty start passage name, using default");
            config.start_passage = StoryConfig::default().start_passage;
        }
        let state = StoryState::new(config.start_passage.clone());
        let registry = PassageRegistry::with_policy(config.duplicate_policy);
        Self {
            config,
            state,
            registry,
            surface: Box::new(HeadlessSurface),
            hooks: Vec::new(),
            next_hook_id: 0,
            listeners: 0,
        }
    }

    /// Replace the rendering surface.
    pub fn with_surface(mut self, surface: impl Surface + 'static) -> Self {
        self.surface = Box::new(surface);
        self
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &StoryConfig {
        &self.config
    }

    /// Show the start passage and attach the click listener.
    ///
    /// Call once. A second call attaches another listener, after which
    /// every choice click navigates once per listener.
    pub fn init(&mut self) -> StoryResult<()> {
        let start = self.config.start_passage.clone();
        let result = self.show_passage(&start);
        self.attach_event_listeners();
        info!("story engine initialized");
        result
    }

    /// Navigate to the passage called `name`.
    ///
    /// On success the passage becomes the only active one, it is recorded
    /// as current and appended to history, the surface scrolls to top, and
    /// every navigation hook runs. On failure nothing changes: not the
    /// current passage, not history, not which passage is visible.
    pub fn show_passage(&mut self, name: &str) -> StoryResult<()> {
        let Some(passage) = self.registry.activate(name) else {
            error!(passage = %name, "passage not found");
            return Err(StoryError::PassageNotFound(name.to_string()));
        };
        self.surface.present(passage);
        self.surface.scroll_to_top();

        let previous = self.state.current_passage.clone();
        self.state.visit(name);

        let nav = Navigation {
            passage: name.to_string(),
            previous,
            step: self.state.history.len(),
        };
        for (_, hook) in &mut self.hooks {
            debug!(hook = hook.name(), "running navigation hook");
            hook.on_navigate(&nav, &mut self.state.variables);
        }

        info!(passage = %name, "navigated to passage");
        Ok(())
    }

    /// Attach the delegated click listener.
    ///
    /// The listener reacts to any click on a choice element, including
    /// choices added after it was attached.
    pub fn attach_event_listeners(&mut self) {
        self.listeners += 1;
        if self.listeners > 1 {
            warn!(
                listeners = self.listeners,
                "click listener attached more than once"
            );
        }
    }

    /// Number of attached click listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners
    }

    /// Deliver a UI event.
    ///
    /// Clicks are ignored until a listener is attached, and clicks on
    /// anything but a choice with a target are ignored always. The result
    /// is that of the last navigation performed.
    pub fn dispatch(&mut self, event: &UiEvent) -> StoryResult<()> {
        match event {
            UiEvent::Click(target) => self.handle_click(target),
            UiEvent::Restart => self.restart(),
        }
    }

    fn handle_click(&mut self, click: &ClickTarget) -> StoryResult<()> {
        let Some(target) = click.navigation_target() else {
            return Ok(());
        };
        if self.listeners == 0 {
            debug!(passage = %target, "click ignored: no listener attached");
            return Ok(());
        }

        let target = target.to_string();
        let mut result = Ok(());
        for _ in 0..self.listeners {
            result = self.show_passage(&target);
        }
        result
    }

    /// Name of the passage currently on display.
    pub fn current_passage(&self) -> &str {
        self.state.current_passage()
    }

    /// The passage currently on display, if one has been shown.
    pub fn current(&self) -> Option<&Passage> {
        self.registry.active()
    }

    /// Passages visited so far, oldest first.
    pub fn history(&self) -> &[String] {
        self.state.history()
    }

    /// The whole story state.
    pub fn state(&self) -> &StoryState {
        &self.state
    }

    /// Set a story variable.
    pub fn set_variable(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        let value = value.into();
        debug!("variable set: {key} = {value}");
        self.state.variables.set(key, value);
    }

    /// Get a story variable. Unset keys yield `None`.
    pub fn variable(&self, key: &str) -> Option<&Value> {
        self.state.variables.get(key)
    }

    /// All story variables.
    pub fn variables(&self) -> &Variables {
        self.state.variables()
    }

    /// Go back to the start passage with empty history and variables.
    ///
    /// The start passage is then shown normally, so afterwards history is
    /// exactly `[start]`. When the start passage is missing the error is
    /// returned with history empty and no passage on display.
    pub fn restart(&mut self) -> StoryResult<()> {
        let start = self.config.start_passage.clone();
        self.state.reset(&start);
        self.registry.deactivate_all();
        let result = self.show_passage(&start);
        info!("story restarted");
        result
    }

    /// Register a hook to run after every successful navigation.
    pub fn on_navigate(&mut self, hook: impl NavigationHook + 'static) -> HookId {
        let id = HookId(self.next_hook_id);
        self.next_hook_id += 1;
        debug!(hook = hook.name(), "navigation hook registered");
        self.hooks.push((id, Box::new(hook)));
        id
    }

    /// Unregister a hook. Returns whether it was registered.
    pub fn remove_hook(&mut self, id: HookId) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|(hook_id, _)| *hook_id != id);
        self.hooks.len() != before
    }

    /// Names of registered hooks, in run order.
    pub fn hook_names(&self) -> Vec<&str> {
        self.hooks.iter().map(|(_, h)| h.name()).collect()
    }

    /// Target of the choice at `index` on the passage on display.
    pub fn choice_target(&self, index: usize) -> Option<&str> {
        self.current()
            .and_then(|p| p.choice(index))
            .map(|c| c.target.as_str())
    }

    /// Click the choice at `index` on the passage on display.
    pub fn click_choice(&mut self, index: usize) -> StoryResult<()> {
        let Some(target) = self.choice_target(index).map(str::to_string) else {
            warn!(
                passage = %self.state.current_passage(),
                index,
                "no choice at this index"
            );
            return Err(StoryError::InvalidChoice(index));
        };
        self.dispatch(&UiEvent::Click(ClickTarget::choice(target)))
    }

    /// The passage collection.
    pub fn registry(&self) -> &PassageRegistry {
        &self.registry
    }

    /// Mutable access to the passage collection, for authoring code.
    pub fn registry_mut(&mut self) -> &mut PassageRegistry {
        &mut self.registry
    }
}

impl Default for StoryEngine {
    fn default() -> Self {
        Self::new(StoryConfig::default())
    }
}
