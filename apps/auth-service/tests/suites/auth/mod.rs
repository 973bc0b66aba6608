mod tampering;
