use core::time::Duration;
use gloo::timers::callback::Timeout;
use pexeso_core::{Clock, TimerTicket};
use yew::html::Scope;

use crate::game::{GameView, Msg};

/// Hide timers backed by `setTimeout`, delivered back to the game component as messages.
///
/// Dropping the [`Timeout`] clears it, which is how the controller cancels a pending hide.
pub(crate) struct TimeoutClock {
    link: Scope<GameView>,
}

impl TimeoutClock {
    pub(crate) fn new(link: Scope<GameView>) -> Self {
        Self { link }
    }
}

impl Clock for TimeoutClock {
    type Handle = Timeout;

    fn after(&mut self, delay: Duration, ticket: TimerTicket) -> Timeout {
        let link = self.link.clone();
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        log::trace!("setTimeout {}ms for {:?}", millis, ticket);
        Timeout::new(millis, move || link.send_message(Msg::HideTimer(ticket)))
    }
}
