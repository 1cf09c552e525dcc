//! Input events and the process-wide listener registry
//!
//! Components that react to input outside their own subtree (overlays that
//! close on Escape or on a click elsewhere) subscribe to one of the global
//! [`Channel`]s on an [`EventDispatcher`]. Subscriptions are held as
//! [`ListenerGuard`]s, which unsubscribe when dropped.
//!
//! # Example
//!
//! ```rust
//! use windmill_core::events::{
//!     Channel, EventDispatcher, EventDispatcherExt, InputEvent, Key, KeyboardEvent,
//! };
//!
//! let dispatcher = EventDispatcher::shared();
//!
//! let guard = dispatcher.listen(Channel::KeyDown, |event| {
//!     if let InputEvent::Keyboard(key) = event {
//!         println!("pressed {:?}", key.key);
//!     }
//! });
//! assert_eq!(dispatcher.listener_count(Channel::KeyDown), 1);
//!
//! dispatcher.dispatch(&InputEvent::Keyboard(KeyboardEvent::pressed(Key::Enter)));
//!
//! drop(guard);
//! assert_eq!(dispatcher.listener_count(Channel::KeyDown), 0);
//! ```

use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use std::sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError};

use crate::tree::NodeId;

// ============================================================================
// Keyboard Events
// ============================================================================

/// Key identifiers
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Space,
    Backspace,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,

    // Arrow keys
    Left,
    Right,
    Up,
    Down,

    // Character input
    Char(char),

    // Unknown key
    Unknown,
}

impl Key {
    /// Parse a key identifier as reported by the host platform
    ///
    /// Both `"Escape"` and the legacy `"Esc"` map to [`Key::Escape`].
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            "Escape" | "Esc" => Key::Escape,
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            " " | "Space" | "Spacebar" => Key::Space,
            "Backspace" => Key::Backspace,
            "Delete" | "Del" => Key::Delete,
            "Home" => Key::Home,
            "End" => Key::End,
            "PageUp" => Key::PageUp,
            "PageDown" => Key::PageDown,
            "ArrowLeft" | "Left" => Key::Left,
            "ArrowRight" | "Right" => Key::Right,
            "ArrowUp" | "Up" => Key::Up,
            "ArrowDown" | "Down" => Key::Down,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => Key::Unknown,
                }
            }
        }
    }

    /// Check if this is the Escape key
    pub fn is_escape(&self) -> bool {
        matches!(self, Key::Escape)
    }
}

/// Key press/release state
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyState {
    /// Key was pressed
    Pressed,
    /// Key was released
    Released,
}

/// Modifier key state
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers {
    /// Shift key is held
    pub shift: bool,
    /// Control key is held
    pub ctrl: bool,
    /// Alt key is held (Option on macOS)
    pub alt: bool,
    /// Meta key is held (Command on macOS, Windows key on Windows)
    pub meta: bool,
}

impl Modifiers {
    /// Check if no modifiers are held
    pub fn is_empty(&self) -> bool {
        !self.shift && !self.ctrl && !self.alt && !self.meta
    }
}

/// Keyboard event
#[derive(Clone, Debug, PartialEq)]
pub struct KeyboardEvent {
    /// The key that was pressed or released
    pub key: Key,
    /// Whether the key was pressed or released
    pub state: KeyState,
    /// Modifier keys held during this event
    pub modifiers: Modifiers,
}

impl KeyboardEvent {
    /// A key press with no modifiers held
    pub fn pressed(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
            modifiers: Modifiers::default(),
        }
    }
}

// ============================================================================
// Pointer Events
// ============================================================================

/// Pointer buttons
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button (or primary touch)
    #[default]
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button (scroll wheel click)
    Middle,
    /// Other button with index
    Other(u16),
}

/// Pointer press
///
/// `target` is the element the press landed on, when the host resolved one.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerEvent {
    /// Element under the pointer
    pub target: Option<NodeId>,
    /// Which button was pressed
    pub button: MouseButton,
    /// X position in window coordinates
    pub x: f32,
    /// Y position in window coordinates
    pub y: f32,
}

impl PointerEvent {
    /// A primary-button press on `target`
    pub fn on(target: NodeId) -> Self {
        Self {
            target: Some(target),
            ..Self::default()
        }
    }

    /// A press that did not resolve to any element
    pub fn untargeted() -> Self {
        Self::default()
    }
}

// ============================================================================
// Dispatch
// ============================================================================

/// Input events delivered through the global channels
#[derive(Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// Keyboard event
    Keyboard(KeyboardEvent),
    /// Pointer press
    Pointer(PointerEvent),
}

impl InputEvent {
    /// The channel this event is delivered on
    pub fn channel(&self) -> Channel {
        match self {
            InputEvent::Keyboard(_) => Channel::KeyDown,
            InputEvent::Pointer(_) => Channel::PointerDown,
        }
    }
}

/// Process-wide input channels
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Key presses
    KeyDown,
    /// Pointer presses
    PointerDown,
}

new_key_type! {
    /// Unique identifier for a registered listener
    pub struct ListenerId;
}

/// Listener callback
pub type ListenerFn = Arc<dyn Fn(&InputEvent) + Send + Sync>;

struct Listener {
    channel: Channel,
    handler: ListenerFn,
}

/// Registry of listeners for the global input channels
pub struct EventDispatcher {
    listeners: SlotMap<ListenerId, Listener>,
}

/// Shared dispatcher handle
pub type SharedEventDispatcher = Arc<Mutex<EventDispatcher>>;

static GLOBAL_DISPATCHER: LazyLock<SharedEventDispatcher> =
    LazyLock::new(EventDispatcher::shared);

/// The process-wide dispatcher
///
/// Hosts feed platform input into this dispatcher; components subscribe to it
/// unless given a dispatcher of their own.
pub fn global_dispatcher() -> SharedEventDispatcher {
    Arc::clone(&GLOBAL_DISPATCHER)
}

impl EventDispatcher {
    /// Create an empty dispatcher
    pub fn new() -> Self {
        Self {
            listeners: SlotMap::with_key(),
        }
    }

    /// Create an empty dispatcher behind a shared handle
    pub fn shared() -> SharedEventDispatcher {
        Arc::new(Mutex::new(Self::new()))
    }

    /// Register a listener on a channel
    pub fn subscribe(&mut self, channel: Channel, handler: ListenerFn) -> ListenerId {
        let id = self.listeners.insert(Listener { channel, handler });
        tracing::debug!(?channel, ?id, "listener subscribed");
        id
    }

    /// Remove a listener, returning whether it was registered
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        match self.listeners.remove(id) {
            Some(listener) => {
                tracing::debug!(channel = ?listener.channel, ?id, "listener released");
                true
            }
            None => false,
        }
    }

    /// Number of listeners on a channel
    pub fn listener_count(&self, channel: Channel) -> usize {
        self.listeners
            .values()
            .filter(|l| l.channel == channel)
            .count()
    }

    /// Total number of listeners
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Whether a listener is still registered
    pub fn is_subscribed(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(id)
    }

    /// Snapshot the handlers registered on a channel
    fn handlers_for(&self, channel: Channel) -> SmallVec<[(ListenerId, ListenerFn); 4]> {
        self.listeners
            .iter()
            .filter(|(_, l)| l.channel == channel)
            .map(|(id, l)| (id, Arc::clone(&l.handler)))
            .collect()
    }
}

impl Default for EventDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn lock(dispatcher: &Mutex<EventDispatcher>) -> MutexGuard<'_, EventDispatcher> {
    dispatcher.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Operations on a shared dispatcher
pub trait EventDispatcherExt {
    /// Subscribe to a channel for as long as the returned guard lives
    fn listen<F>(&self, channel: Channel, handler: F) -> ListenerGuard
    where
        F: Fn(&InputEvent) + Send + Sync + 'static;

    /// Deliver an event to every listener on its channel
    ///
    /// Handlers run after the dispatcher lock is released, so they may
    /// subscribe or unsubscribe. A listener removed by an earlier handler in
    /// the same dispatch is skipped. Returns the number of handlers invoked.
    fn dispatch(&self, event: &InputEvent) -> usize;

    /// Number of listeners on a channel
    fn listener_count(&self, channel: Channel) -> usize;
}

impl EventDispatcherExt for SharedEventDispatcher {
    fn listen<F>(&self, channel: Channel, handler: F) -> ListenerGuard
    where
        F: Fn(&InputEvent) + Send + Sync + 'static,
    {
        let id = lock(self).subscribe(channel, Arc::new(handler));
        ListenerGuard {
            dispatcher: Arc::clone(self),
            id,
            channel,
        }
    }

    fn dispatch(&self, event: &InputEvent) -> usize {
        let handlers = lock(self).handlers_for(event.channel());
        let mut invoked = 0;
        for (id, handler) in &handlers {
            if !lock(self).is_subscribed(*id) {
                tracing::trace!(?id, "skipping listener released during dispatch");
                continue;
            }
            handler(event);
            invoked += 1;
        }
        invoked
    }

    fn listener_count(&self, channel: Channel) -> usize {
        lock(self).listener_count(channel)
    }
}

/// Scoped listener registration
///
/// The listener stays registered until the guard is dropped.
#[must_use = "dropping the guard unsubscribes the listener immediately"]
pub struct ListenerGuard {
    dispatcher: SharedEventDispatcher,
    id: ListenerId,
    channel: Channel,
}

impl ListenerGuard {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("id", &self.id)
            .field("channel", &self.channel)
            .finish()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        lock(&self.dispatcher).unsubscribe(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::ElementTree;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn escape() -> InputEvent {
        InputEvent::Keyboard(KeyboardEvent::pressed(Key::Escape))
    }

    #[test]
    fn test_key_identifiers() {
        assert_eq!(Key::from_identifier("Escape"), Key::Escape);
        assert_eq!(Key::from_identifier("Esc"), Key::Escape);
        assert_eq!(Key::from_identifier("Enter"), Key::Enter);
        assert_eq!(Key::from_identifier("ArrowLeft"), Key::Left);
        assert_eq!(Key::from_identifier("a"), Key::Char('a'));
        assert_eq!(Key::from_identifier("F13"), Key::Unknown);
        assert_eq!(Key::from_identifier(""), Key::Unknown);
    }

    #[test]
    fn test_dispatch_only_reaches_matching_channel() {
        let dispatcher = EventDispatcher::shared();
        let keys = Arc::new(AtomicUsize::new(0));
        let presses = Arc::new(AtomicUsize::new(0));

        let keys_clone = keys.clone();
        let _k = dispatcher.listen(Channel::KeyDown, move |_| {
            keys_clone.fetch_add(1, Ordering::SeqCst);
        });
        let presses_clone = presses.clone();
        let _p = dispatcher.listen(Channel::PointerDown, move |_| {
            presses_clone.fetch_add(1, Ordering::SeqCst);
        });

        assert_eq!(dispatcher.dispatch(&escape()), 1);
        assert_eq!(keys.load(Ordering::SeqCst), 1);
        assert_eq!(presses.load(Ordering::SeqCst), 0);

        let mut tree = ElementTree::new();
        let node = tree.create_node(None);
        dispatcher.dispatch(&InputEvent::Pointer(PointerEvent::on(node)));
        assert_eq!(presses.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_guard_unsubscribes_on_drop() {
        let dispatcher = EventDispatcher::shared();
        let guard = dispatcher.listen(Channel::KeyDown, |_| {});
        assert_eq!(dispatcher.listener_count(Channel::KeyDown), 1);

        drop(guard);
        assert_eq!(dispatcher.listener_count(Channel::KeyDown), 0);
        assert_eq!(dispatcher.dispatch(&escape()), 0);
    }

    #[test]
    fn test_handler_may_unsubscribe_during_dispatch() {
        let dispatcher = EventDispatcher::shared();
        let slot: Arc<Mutex<Option<ListenerGuard>>> = Arc::new(Mutex::new(None));

        let slot_clone = slot.clone();
        let guard = dispatcher.listen(Channel::KeyDown, move |_| {
            drop(slot_clone.lock().unwrap().take());
        });
        *slot.lock().unwrap() = Some(guard);

        dispatcher.dispatch(&escape());
        assert_eq!(dispatcher.listener_count(Channel::KeyDown), 0);
    }

    #[test]
    fn test_listener_released_mid_dispatch_is_skipped() {
        let dispatcher = EventDispatcher::shared();
        let second_calls = Arc::new(AtomicUsize::new(0));
        let second_slot: Arc<Mutex<Option<ListenerGuard>>> = Arc::new(Mutex::new(None));

        let slot_clone = second_slot.clone();
        let _first = dispatcher.listen(Channel::KeyDown, move |_| {
            drop(slot_clone.lock().unwrap().take());
        });
        let calls_clone = second_calls.clone();
        let second = dispatcher.listen(Channel::KeyDown, move |_| {
            calls_clone.fetch_add(1, Ordering::SeqCst);
        });
        *second_slot.lock().unwrap() = Some(second);

        assert_eq!(dispatcher.dispatch(&escape()), 1);
        assert_eq!(second_calls.load(Ordering::SeqCst), 0);
        assert_eq!(dispatcher.listener_count(Channel::KeyDown), 1);
    }

    #[test]
    fn test_unsubscribe_unknown_id() {
        let mut dispatcher = EventDispatcher::new();
        let id = dispatcher.subscribe(Channel::KeyDown, Arc::new(|_: &InputEvent| {}));
        assert!(dispatcher.unsubscribe(id));
        assert!(!dispatcher.unsubscribe(id));
        assert!(dispatcher.is_empty());
    }
}
