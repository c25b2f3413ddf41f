pub enum ControllerMessage {
	TogglePause,
	FrameForward,
	TogglePins,
	ToggleWind,
	ToggleBall,
}
