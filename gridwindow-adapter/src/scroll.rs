use gridwindow::ScrollState;

/// Class name the page layout puts on the ancestor scroll container.
///
/// Looking the container up by this class is the page-composition layer's job; the controller
/// only ever receives the resolved container.
pub const GLOBAL_SCROLL_CONTAINER_CLASS: &str = "global-scroll-container";

/// Identifies one registered scroll listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// The element the grid is rendered into.
///
/// Implementations are usually cheap handles onto host UI nodes, so every method takes
/// `&self`.
pub trait GridElement {
    /// Whether the element is currently attached to the page.
    fn is_mounted(&self) -> bool;
    /// Layout width of the element (`offsetWidth`).
    fn width(&self) -> f64;
    /// Top edge in viewport coordinates (`getBoundingClientRect().top`).
    fn client_top(&self) -> f64;
}

/// The ancestor element whose scrolling moves the grid.
pub trait ScrollContainer {
    fn is_attached(&self) -> bool;
    fn scroll_top(&self) -> f64;
    /// Visible height of the container (`clientHeight`).
    fn viewport_height(&self) -> f64;
    /// Top edge in viewport coordinates (`getBoundingClientRect().top`).
    fn client_top(&self) -> f64;
    /// Registers the scroll listener that forwards to [`crate::GridController::on_scroll`].
    fn add_scroll_listener(&self) -> ListenerId;
    fn remove_scroll_listener(&self, id: ListenerId);
}

/// Binds a grid element to its scroll container and translates container scroll positions into
/// grid-relative [`ScrollState`]s.
///
/// The listener registered by [`Self::bind`] is removed by [`Self::unbind`] or, failing that,
/// when the binder is dropped.
#[derive(Debug)]
pub struct ScrollBinder<E, C: ScrollContainer> {
    element: E,
    container: C,
    listener: Option<ListenerId>,
}

impl<E: GridElement, C: ScrollContainer> ScrollBinder<E, C> {
    pub fn bind(element: E, container: C) -> Self {
        let listener = container.add_scroll_listener();
        gdebug!(listener = listener.0, "ScrollBinder::bind");
        Self {
            element,
            container,
            listener: Some(listener),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.listener.is_some()
    }

    pub fn element(&self) -> &E {
        &self.element
    }

    pub fn container(&self) -> &C {
        &self.container
    }

    /// Width available to the grid, or `None` while the element is unmounted or has no width.
    pub fn grid_width(&self) -> Option<f64> {
        if !self.element.is_mounted() {
            return None;
        }
        let width = self.element.width();
        (width.is_finite() && width > 0.0).then_some(width)
    }

    /// Offset of the grid's top edge within the container's scrollable content.
    pub fn grid_top(&self) -> Option<f64> {
        if !self.element.is_mounted() || !self.container.is_attached() {
            return None;
        }
        let viewport_offset = self.element.client_top() - self.container.client_top();
        Some(viewport_offset + self.container.scroll_top())
    }

    /// Current grid-relative scroll state; zeroed when either side is not mounted.
    pub fn scroll_state(&self) -> ScrollState {
        let Some(grid_top) = self.grid_top() else {
            return ScrollState::default();
        };
        ScrollState::new(
            self.container.scroll_top() - grid_top,
            self.container.viewport_height(),
        )
        .sanitized()
    }

    /// Moves the binding to a remounted element and its (re-resolved) container.
    pub fn rebind(&mut self, element: E, container: C) {
        self.unbind();
        self.element = element;
        self.container = container;
        let listener = self.container.add_scroll_listener();
        gdebug!(listener = listener.0, "ScrollBinder::rebind");
        self.listener = Some(listener);
    }
}

impl<E, C: ScrollContainer> ScrollBinder<E, C> {
    /// Removes the scroll listener. Safe to call any number of times.
    pub fn unbind(&mut self) {
        if let Some(listener) = self.listener.take() {
            gdebug!(listener = listener.0, "ScrollBinder::unbind");
            self.container.remove_scroll_listener(listener);
        }
    }
}

impl<E, C: ScrollContainer> Drop for ScrollBinder<E, C> {
    fn drop(&mut self) {
        self.unbind();
    }
}
