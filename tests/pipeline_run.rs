//! Integration tests for the training and evaluation pipelines

use qtactoe::{
    Board, Evaluation, EvaluationConfig, Outcome, Trainer, TrainingConfig, ports::Observer,
};

/// Observer that checks the event sequence as it happens
struct CountingObserver {
    expected_total: usize,
    seen: usize,
}

impl Observer for CountingObserver {
    fn on_training_start(&mut self, total_episodes: usize) -> qtactoe::Result<()> {
        assert_eq!(total_episodes, self.expected_total);
        Ok(())
    }

    fn on_episode_end(&mut self, episode: usize, outcome: Outcome) -> qtactoe::Result<()> {
        assert!(outcome.is_terminal(), "episode ended while in progress");
        assert_eq!(episode, self.seen);
        self.seen += 1;
        Ok(())
    }

    fn on_training_end(&mut self) -> qtactoe::Result<()> {
        assert_eq!(self.seen, self.expected_total);
        Ok(())
    }
}

#[test]
fn observers_see_every_episode_in_order() {
    let config = TrainingConfig::default().with_episodes(40).with_seed(5);
    let mut trainer = Trainer::new(config)
        .unwrap()
        .with_observer(Box::new(CountingObserver {
            expected_total: 40,
            seen: 0,
        }));

    let result = trainer.run().unwrap();
    assert_eq!(result.total_episodes, 40);
    assert_eq!(result.wins + result.draws + result.losses, 40);
}

#[test]
fn training_populates_the_table_from_the_opening() {
    let config = TrainingConfig::default().with_episodes(500).with_seed(11);
    let mut trainer = Trainer::new(config).unwrap();
    trainer.run().unwrap();

    // Every episode starts at the empty board, so most opening actions get
    // visited over 500 episodes
    let opening = Board::new();
    let visited = (0..9)
        .filter(|&a| trainer.table().get(&opening, a) != 0.0)
        .count();
    assert!(visited >= 5, "only {visited} opening actions carry a value");
}

#[test]
fn trained_agent_beats_random_play() {
    let config = TrainingConfig::default().with_seed(42);
    let mut trainer = Trainer::new(config).unwrap();
    trainer.run().unwrap();

    let mut agent = trainer.into_agent();
    let eval_config = EvaluationConfig {
        games: 200,
        seed: Some(43),
    };
    let result = Evaluation::new(eval_config).run(&mut agent).unwrap();

    assert_eq!(result.total_episodes, 200);
    assert!(
        result.win_rate > 0.7,
        "trained agent only won {:.1}% of evaluation games",
        result.win_rate * 100.0
    );
}

#[test]
fn seeded_runs_are_reproducible_end_to_end() {
    let run = || {
        let config = TrainingConfig::default().with_episodes(300).with_seed(17);
        let mut trainer = Trainer::new(config).unwrap();
        let training = trainer.run().unwrap();

        let mut agent = trainer.into_agent();
        let evaluation = Evaluation::new(EvaluationConfig {
            games: 50,
            seed: Some(18),
        })
        .run(&mut agent)
        .unwrap();

        (
            training.wins,
            training.draws,
            training.losses,
            evaluation.wins,
            evaluation.draws,
            evaluation.losses,
        )
    };

    assert_eq!(run(), run());
}
