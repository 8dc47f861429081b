//! Component trait for prop-driven views

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A view that draws from borrowed props and answers input with actions
///
/// Application data reaches a component only through `Props`, and a
/// component changes that data only by returning actions from
/// `handle_event`. Purely visual bookkeeping (an editor cursor, a scroll
/// offset) may live on `&mut self`.
///
/// # Example
///
/// ```ignore
/// use empholite_dispatch::{Component, EventKind, Frame, Rect};
///
/// struct Banner;
///
/// struct BannerProps<'a> {
///     message: &'a Message,
/// }
///
/// impl Component<Action> for Banner {
///     type Props<'a> = BannerProps<'a>;
///
///     fn handle_event(&mut self, event: &EventKind, props: Self::Props<'_>) -> impl IntoIterator<Item = Action> {
///         let EventKind::Key(key) = event else { return None };
///         (key.code == KeyCode::Char('x') && !props.message.is_empty())
///             .then_some(Action::MessageClear)
///     }
///
///     fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
///         frame.render_widget(Paragraph::new(props.message.text.as_str()), area);
///     }
/// }
/// ```
pub trait Component<A> {
    /// Borrowed view of the state this component draws
    type Props<'a>;

    /// Turn an input event into zero or more actions
    ///
    /// `None`, `Some(action)`, arrays and vectors all work as return
    /// values. Display-only components keep the default, which emits
    /// nothing.
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Draw into `area`
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
