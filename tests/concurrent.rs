// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::HashSet;
use std::io;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;

use logladder::Flags;
use logladder::Level;
use logladder::LevelFilter;
use logladder::LeveledLogger;
use logladder::SinkConfig;
use logladder::append::Output;
use rand::Rng;
use rand::distr::Alphanumeric;

const WORKERS: usize = 8;
const MESSAGES: usize = 400;

#[derive(Clone, Default)]
struct Buffer(Arc<Mutex<Vec<u8>>>);

impl Buffer {
    fn lines(&self) -> Vec<String> {
        let bytes = self.0.lock().unwrap().clone();
        String::from_utf8(bytes)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn random_level(rng: &mut impl Rng) -> Level {
    Level::iter().nth(rng.random_range(0..7)).unwrap()
}

fn random_payload(rng: &mut impl Rng) -> String {
    let len = rng.random_range(1..=32);
    std::iter::repeat(())
        .map(|()| rng.sample(Alphanumeric))
        .map(char::from)
        .take(len)
        .collect()
}

fn shared_logger(buffer: &Buffer) -> LeveledLogger {
    LeveledLogger::builder()
        .all_default(SinkConfig::new(Output::writer(buffer.clone())).flags(Flags::empty()))
        .label(LevelFilter::All, "| ")
        .build()
}

#[test]
fn lines_stay_whole_while_the_filter_changes() {
    let buffer = Buffer::default();
    let logger = shared_logger(&buffer);
    let done = AtomicBool::new(false);

    std::thread::scope(|s| {
        s.spawn(|| {
            let mut rng = rand::rng();
            while !done.load(Ordering::Relaxed) {
                let filter = LevelFilter::from_ordinal(rng.random_range(0..=7)).unwrap();
                logger.set_level(filter);
                std::thread::yield_now();
            }
        });

        let workers = (0..WORKERS)
            .map(|worker| {
                let logger = &logger;
                s.spawn(move || {
                    let mut rng = rand::rng();
                    for i in 0..MESSAGES {
                        let level = random_level(&mut rng);
                        let payload = random_payload(&mut rng);
                        logger.log(level, format_args!("w{worker}-{i}-{payload}"));
                    }
                })
            })
            .collect::<Vec<_>>();
        for worker in workers {
            worker.join().unwrap();
        }
        done.store(true, Ordering::Relaxed);
    });

    let lines = buffer.lines();
    assert!(lines.len() <= WORKERS * MESSAGES);

    let mut seen = HashSet::new();
    for line in &lines {
        let message = line.strip_prefix("| ").unwrap_or_else(|| panic!("{line}"));
        let mut parts = message.splitn(3, '-');
        let worker = parts.next().unwrap();
        let index = parts.next().unwrap();
        let payload = parts.next().unwrap();
        assert!(worker.starts_with('w'), "{line}");
        assert!(worker[1..].parse::<usize>().unwrap() < WORKERS, "{line}");
        assert!(index.parse::<usize>().unwrap() < MESSAGES, "{line}");
        assert!(!payload.is_empty(), "{line}");
        assert!(payload.chars().all(|c| c.is_ascii_alphanumeric()), "{line}");
        assert!(seen.insert(format!("{worker}-{index}")), "duplicate {line}");
    }
}

#[test]
fn admitted_count_matches_fixed_filter() {
    let buffer = Buffer::default();
    let logger = shared_logger(&buffer);
    logger.set_level(LevelFilter::Notice);

    let admitted = std::thread::scope(|s| {
        let workers = (0..WORKERS)
            .map(|worker| {
                let logger = &logger;
                s.spawn(move || {
                    let mut rng = rand::rng();
                    let mut admitted = 0;
                    for i in 0..MESSAGES {
                        let level = random_level(&mut rng);
                        if level <= LevelFilter::Notice {
                            admitted += 1;
                        }
                        logger.log(level, format_args!("w{worker}-{i}"));
                    }
                    admitted
                })
            })
            .collect::<Vec<_>>();
        workers
            .into_iter()
            .map(|worker| worker.join().unwrap())
            .sum::<usize>()
    });

    assert_eq!(buffer.lines().len(), admitted);
}

#[test]
fn reconfiguring_outputs_under_load() {
    let first = Buffer::default();
    let second = Buffer::default();
    let logger = shared_logger(&first);
    logger.set_level(LevelFilter::All);
    let second_output = Output::writer(second.clone());

    std::thread::scope(|s| {
        s.spawn(|| {
            for i in 0..MESSAGES {
                if i == MESSAGES / 2 {
                    logger.set_output(LevelFilter::All, second_output.clone());
                }
                std::thread::yield_now();
            }
        });
        for worker in 0..WORKERS {
            let logger = &logger;
            s.spawn(move || {
                for i in 0..MESSAGES {
                    logger.info(format_args!("w{worker}-{i}"));
                }
            });
        }
    });

    assert_eq!(
        first.lines().len() + second.lines().len(),
        WORKERS * MESSAGES
    );
    assert_eq!(logger.sink(Level::Info).output(), second_output);
}
