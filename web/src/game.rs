use crate::button::Button;
use crate::clock::TimeoutClock;
use crate::storage::LocalStorageBackend;
use crate::utils::js_random_seed;
use core::time::Duration;
use pexeso_core as game;
use yew::prelude::*;

const ASSET_BASE: &str = "/assets";
const ASSET_EXT: &str = "png";

type Controller = game::GameController<
    game::BestScoreStore<LocalStorageBackend>,
    TimeoutClock,
    game::RandomShuffler,
>;

pub trait HasUpdate {
    fn has_update(self) -> bool;
}

impl<E> HasUpdate for Result<game::Outcome, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |outcome: game::Outcome| outcome.has_update())
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    CardClick(game::CardIndex),
    HideTimer(game::TimerTicket),
    PlayAgain,
}

#[derive(Properties, Clone, PartialEq)]
struct CardProps {
    index: game::CardIndex,
    src: AttrValue,
    revealed: bool,
    #[prop_or_default]
    locked: bool,
    callback: Callback<game::CardIndex>,
}

#[function_component(CardView)]
fn card_component(props: &CardProps) -> Html {
    let CardProps {
        index,
        src,
        revealed,
        locked,
        callback,
    } = props.clone();

    let class = classes!(
        "card",
        revealed.then_some("revealed"),
        locked.then_some("cannot-click")
    );

    let onclick = Callback::from(move |e: MouseEvent| {
        e.prevent_default();
        log::trace!("card {} clicked", index);
        callback.emit(index);
    });

    html! {
        <img {class} {src} alt="memory game card" {onclick}/>
    }
}

fn status_view(snapshot: &game::Snapshot, on_play_again: Callback<MouseEvent>) -> Html {
    if snapshot.won {
        html! {
            <div class="won">
                <p class="stat">{"You pressed "}<strong>{snapshot.moves}</strong>{" times to win!"}</p>
                <Button onclick={on_play_again} class={classes!("no-line-break")}>{"Play again"}</Button>
            </div>
        }
    } else {
        html! {
            <p class="stat">{"Click count: "}<strong>{snapshot.moves}</strong></p>
        }
    }
}

fn best_score_view(best_score: Option<game::MoveCount>) -> Html {
    match best_score {
        Some(best) => html! {
            <p class="stat">{"Highest record (least pressed): "}<strong>{best}</strong></p>
        },
        None => html! {},
    }
}

#[derive(Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Fixed shuffle seed, random when absent
    #[prop_or_default]
    pub seed: Option<u64>,
    #[prop_or(1000)]
    pub hide_delay_ms: u32,
}

pub(crate) struct GameView {
    controller: Controller,
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let seed = props.seed.unwrap_or_else(js_random_seed);
        log::debug!("shuffle seed: {}", seed);

        let config =
            game::ControllerConfig::new(Duration::from_millis(props.hide_delay_ms.into()));
        let controller = game::GameController::new(
            game::BestScoreStore::new(LocalStorageBackend),
            TimeoutClock::new(ctx.link().clone()),
            game::RandomShuffler::new(seed),
            config,
        );

        Self { controller }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        match msg {
            CardClick(index) => {
                log::debug!("reveal card: {}", index);
                self.controller.click(index).has_update()
            }
            HideTimer(ticket) => self.controller.hide_timer_fired(ticket).has_update(),
            PlayAgain => {
                log::debug!("play again");
                self.controller.play_again().has_update()
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let snapshot = self.controller.snapshot();
        let locked = snapshot.locked;

        let cb_card = ctx.link().callback(Msg::CardClick);
        let cb_play_again = ctx.link().callback(|e: MouseEvent| {
            e.stop_propagation();
            Msg::PlayAgain
        });

        html! {
            <div class="pexeso">
                { status_view(&snapshot, cb_play_again) }
                <div class="cards">
                    {
                        for snapshot.face_paths(ASSET_BASE, ASSET_EXT).enumerate().map(|(position, src)| {
                            let index = position as game::CardIndex;
                            let revealed = snapshot.revealed[position];
                            html! {
                                <CardView
                                    key={snapshot.cards[position].clone()}
                                    {index}
                                    src={AttrValue::from(src)}
                                    {revealed}
                                    {locked}
                                    callback={cb_card.clone()}
                                />
                            }
                        })
                    }
                </div>
                { best_score_view(snapshot.best_score) }
            </div>
        }
    }
}
