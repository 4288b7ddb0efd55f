use bevy::prelude::*;
use flight::{Audio, Clip, Emitter, Particles};

/// The craft's audio channel: one looping clip plus queued one-shots.
#[derive(Component, Debug, Default)]
pub struct EngineAudio {
    looping: Option<Clip>,
    one_shots: Vec<Clip>,
}

impl EngineAudio {
    pub fn looping(&self) -> Option<Clip> {
        self.looping
    }

    pub fn queued_one_shots(&self) -> &[Clip] {
        &self.one_shots
    }

    pub fn take_one_shots(&mut self) -> Vec<Clip> {
        std::mem::take(&mut self.one_shots)
    }
}

impl Audio for EngineAudio {
    fn play_looping(&mut self, clip: Clip) {
        self.looping = Some(clip);
    }

    fn play_one_shot(&mut self, clip: Clip) {
        self.one_shots.push(clip);
    }

    fn stop(&mut self) {
        self.looping = None;
    }

    fn is_playing(&self) -> bool {
        self.looping.is_some()
    }
}

/// Playing state of each particle system mounted on the craft.
#[derive(Component, Debug, Default)]
pub struct EmitterRack {
    playing: [bool; 3],
}

impl Particles for EmitterRack {
    fn play(&mut self, emitter: Emitter) {
        self.playing[emitter.slot()] = true;
    }

    fn stop(&mut self, emitter: Emitter) {
        self.playing[emitter.slot()] = false;
    }

    fn is_playing(&self, emitter: Emitter) -> bool {
        self.playing[emitter.slot()]
    }
}

/// Child entity drawn while its emitter plays.
#[derive(Component, Debug, Clone, Copy)]
pub struct EmitterVisual(pub Emitter);

pub fn sync_emitters(
    racks: Query<&EmitterRack>,
    mut visuals: Query<(&EmitterVisual, &Parent, &mut Visibility)>,
) {
    for (visual, parent, mut visibility) in &mut visuals {
        let Ok(rack) = racks.get(parent.get()) else {
            continue;
        };
        let wanted = if rack.is_playing(visual.0) {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        if *visibility != wanted {
            *visibility = wanted;
        }
    }
}

#[cfg(feature = "audio")]
pub use playback::{RocketSounds, play_audio};

#[cfg(feature = "audio")]
mod playback {
    use bevy::prelude::*;
    use flight::Clip;

    use super::EngineAudio;

    #[derive(Resource)]
    pub struct RocketSounds {
        main_engine: Handle<AudioSource>,
        death: Handle<AudioSource>,
        success: Handle<AudioSource>,
    }

    impl RocketSounds {
        pub fn load(asset_server: &AssetServer, dir: &str) -> Self {
            let dir = dir.trim_end_matches('/');
            Self {
                main_engine: asset_server.load(format!("{dir}/main_engine.ogg")),
                death: asset_server.load(format!("{dir}/death.ogg")),
                success: asset_server.load(format!("{dir}/success.ogg")),
            }
        }

        fn handle(&self, clip: Clip) -> Handle<AudioSource> {
            match clip {
                Clip::MainEngine => self.main_engine.clone(),
                Clip::Death => self.death.clone(),
                Clip::Success => self.success.clone(),
            }
        }
    }

    /// Looping engine sink, parented to the craft so it dies with it.
    #[derive(Component)]
    pub struct EngineLoop;

    pub fn play_audio(
        mut commands: Commands,
        sounds: Option<Res<RocketSounds>>,
        mut crafts: Query<(Entity, &mut EngineAudio)>,
        loops: Query<(Entity, &Parent), With<EngineLoop>>,
    ) {
        let Some(sounds) = sounds else {
            return;
        };
        for (owner, mut audio) in &mut crafts {
            let sink = loops
                .iter()
                .find(|(_, parent)| parent.get() == owner)
                .map(|(entity, _)| entity);
            match (audio.looping(), sink) {
                (Some(clip), None) => {
                    commands.entity(owner).with_children(|parent| {
                        parent.spawn((
                            AudioBundle {
                                source: sounds.handle(clip),
                                settings: PlaybackSettings::LOOP,
                            },
                            EngineLoop,
                        ));
                    });
                }
                (None, Some(sink)) => {
                    commands.entity(owner).remove_children(&[sink]);
                    commands.entity(sink).despawn();
                }
                _ => {}
            }
            for clip in audio.take_one_shots() {
                commands.spawn((
                    AudioBundle {
                        source: sounds.handle(clip),
                        settings: PlaybackSettings::DESPAWN,
                    },
                    crate::RocketBoostEntity,
                ));
            }
        }
    }
}
